//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `.devlift.toml` in the working directory (or `--config <path>`)
//! 4. `{config_dir}/devlift/config.toml` (global defaults; see [`Env::config_dir`])
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::constants;
use crate::env::Env;
use crate::models::{GenerateOptions, ProviderName};

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub generation: GenerateOptions,
    pub providers: ProvidersConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed to call the API from a browser.
    pub cors_origins: Vec<String>,
    /// Upper bound on a single provider attempt. `0` disables it.
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: constants::DEFAULT_HOST.to_string(),
            port: constants::DEFAULT_PORT,
            cors_origins: constants::DEFAULT_CORS_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
            timeout_secs: constants::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn provider_timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// Per-provider settings. Unset fields fall back to the provider's defaults.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    /// Cloudflare only: the account owning the Workers AI binding.
    pub account_id: Option<String>,
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("account_id", &self.account_id)
            .finish()
    }
}

impl ProviderSettings {
    /// Model to request, falling back to the provider default.
    pub fn model_for(&self, name: ProviderName) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| name.default_model().to_string())
    }

    /// Base URL to call, falling back to the provider default.
    pub fn base_url_for(&self, name: ProviderName) -> Option<String> {
        self.base_url
            .clone()
            .or_else(|| name.default_base_url().map(str::to_string))
    }

    /// API key, ignoring empty or whitespace-only values.
    pub fn credential(&self) -> Option<&str> {
        non_blank(self.api_key.as_deref())
    }

    /// Cloudflare account id, ignoring empty or whitespace-only values.
    pub fn account(&self) -> Option<&str> {
        non_blank(self.account_id.as_deref())
    }

    /// Trim credential fields and drop the blank ones.
    fn clear_blank(&mut self) {
        for field in [&mut self.api_key, &mut self.account_id] {
            *field = field
                .take()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
        }
    }

    fn merge(&mut self, other: ProviderSettings) {
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.model.is_some() {
            self.model = other.model;
        }
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.account_id.is_some() {
            self.account_id = other.account_id;
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Settings for every supported provider, keyed like `[providers.nvidia]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub nvidia: ProviderSettings,
    pub cloudflare: ProviderSettings,
    pub together: ProviderSettings,
    pub openai: ProviderSettings,
}

impl ProvidersConfig {
    pub fn get(&self, name: ProviderName) -> &ProviderSettings {
        match name {
            ProviderName::Nvidia => &self.nvidia,
            ProviderName::Cloudflare => &self.cloudflare,
            ProviderName::Together => &self.together,
            ProviderName::OpenAI => &self.openai,
        }
    }

    pub fn get_mut(&mut self, name: ProviderName) -> &mut ProviderSettings {
        match name {
            ProviderName::Nvidia => &mut self.nvidia,
            ProviderName::Cloudflare => &mut self.cloudflare,
            ProviderName::Together => &mut self.together,
            ProviderName::OpenAI => &mut self.openai,
        }
    }
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// `config_file` is an explicit path (from `--config`) and must exist.
    /// Without it, `.devlift.toml` in the working directory is used if present.
    pub fn load(config_file: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Layer 4: global config
        if let Some(global_path) = Self::global_config_path(env) {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        // Layer 3: local or explicit config
        match config_file {
            Some(path) => {
                let local = Self::load_file(path)?;
                config.merge(local);
            }
            None => {
                let local_path = Path::new(constants::CONFIG_FILENAME);
                if local_path.exists() {
                    let local = Self::load_file(local_path)?;
                    config.merge(local);
                }
            }
        }

        // `api_key = ""` in a file means unset
        for name in ProviderName::PRIORITY {
            config.providers.get_mut(name).clear_blank();
        }

        // Layer 2: environment variables
        config.apply_env_vars(env);

        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path(env: &Env) -> Option<PathBuf> {
        env.config_dir()
            .map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge another config into this one (other takes precedence for non-default values).
    fn merge(&mut self, other: Config) {
        let default_server = ServerConfig::default();
        if other.server.host != default_server.host {
            self.server.host = other.server.host;
        }
        if other.server.port != default_server.port {
            self.server.port = other.server.port;
        }
        if other.server.cors_origins != default_server.cors_origins {
            self.server.cors_origins = other.server.cors_origins;
        }
        if other.server.timeout_secs != default_server.timeout_secs {
            self.server.timeout_secs = other.server.timeout_secs;
        }

        let default_generation = GenerateOptions::default();
        if other.generation.max_tokens != default_generation.max_tokens {
            self.generation.max_tokens = other.generation.max_tokens;
        }
        if other.generation.temperature != default_generation.temperature {
            self.generation.temperature = other.generation.temperature;
        }

        for name in ProviderName::PRIORITY {
            let theirs = other.providers.get(name).clone();
            self.providers.get_mut(name).merge(theirs);
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(val) = env.non_empty(constants::ENV_HOST) {
            self.server.host = val;
        }
        if let Some(val) = env.non_empty(constants::ENV_PORT) {
            match val.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("ignoring invalid {} value: {val}", constants::ENV_PORT),
            }
        }
        if let Some(val) = env.non_empty(constants::ENV_TIMEOUT_SECS) {
            match val.parse::<u64>() {
                Ok(secs) => self.server.timeout_secs = secs,
                Err(_) => tracing::warn!(
                    "ignoring invalid {} value: {val}",
                    constants::ENV_TIMEOUT_SECS
                ),
            }
        }
        if let Some(val) = env.non_empty(constants::ENV_CORS_ORIGINS) {
            self.server.cors_origins = val
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }

        // Provider-specific credentials and overrides
        for name in ProviderName::PRIORITY {
            let prefix = name.env_prefix();
            let settings = self.providers.get_mut(name);
            if let Some(key) = env.non_empty(&name.api_key_env_var()) {
                settings.api_key = Some(key);
            }
            if let Some(model) = env.non_empty(&format!("{prefix}_MODEL")) {
                settings.model = Some(model);
            }
            if let Some(url) = env.non_empty(&format!("{prefix}_BASE_URL")) {
                settings.base_url = Some(url);
            }
        }
        if let Some(account) = env.non_empty(constants::ENV_CLOUDFLARE_ACCOUNT_ID) {
            self.providers.cloudflare.account_id = Some(account);
        }
    }
}

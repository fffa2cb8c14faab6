//! Integration tests for the library functions backing the CLI commands.
//!
//! `devlift providers` and `devlift serve` both start from `Config::load`
//! followed by provider construction; these tests exercise that path
//! through the public API with mock environments and temp config files.
//! A mock `Env` has no global config directory unless `XDG_CONFIG_HOME`
//! is set, so the developer's own config never leaks in.

use std::fs;

use devlift::config::{Config, ConfigError};
use devlift::env::Env;
use devlift::models::ProviderName;
use devlift::orchestrator::AiOrchestrator;
use devlift::providers::{build_providers, provider_statuses};

fn write_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("devlift.toml");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

// ---------------------------------------------------------------------------
// providers
// ---------------------------------------------------------------------------

#[test]
fn providers_from_env_only() {
    let (_dir, path) = write_config("");
    let env = Env::mock([
        ("NVIDIA_API_KEY", "nvapi-test"),
        ("CLOUDFLARE_API_KEY", "cf-test"),
        ("CLOUDFLARE_ACCOUNT_ID", "acct"),
    ]);
    let config = Config::load(Some(&path), &env).unwrap();
    let statuses = provider_statuses(&config.providers);

    let active: Vec<ProviderName> = statuses.iter().filter(|s| s.active).map(|s| s.name).collect();
    assert_eq!(active, vec![ProviderName::Nvidia, ProviderName::Cloudflare]);
    assert_eq!(statuses.len(), 4);
}

#[test]
fn providers_from_file_with_model_override() {
    let (_dir, path) = write_config(
        r#"
[providers.together]
api_key = "tg-file"
model = "mistralai/Mixtral-8x7B-Instruct-v0.1"
"#,
    );
    let config = Config::load(Some(&path), &Env::empty()).unwrap();
    let statuses = provider_statuses(&config.providers);

    let together = statuses
        .iter()
        .find(|s| s.name == ProviderName::Together)
        .unwrap();
    assert!(together.active);
    assert_eq!(together.model, "mistralai/Mixtral-8x7B-Instruct-v0.1");
}

#[test]
fn blank_file_keys_leave_providers_inactive() {
    let (_dir, path) = write_config(
        r#"
[providers.openai]
api_key = ""

[providers.together]
api_key = "   "
"#,
    );
    let config = Config::load(Some(&path), &Env::empty()).unwrap();

    assert!(build_providers(&config.providers).is_empty());
    assert!(AiOrchestrator::from_config(&config)
        .list_available_providers()
        .is_empty());
    let statuses = provider_statuses(&config.providers);
    assert!(statuses.iter().all(|s| !s.active));
    assert_eq!(
        statuses[2].reason.as_deref(),
        Some("TOGETHER_API_KEY not set")
    );
}

#[test]
fn global_config_is_layered_under_explicit_file() {
    let home = tempfile::tempdir().unwrap();
    fs::create_dir_all(home.path().join("devlift")).unwrap();
    fs::write(
        home.path().join("devlift").join("config.toml"),
        "[providers.nvidia]\napi_key = \"nv-global\"\n",
    )
    .unwrap();
    let (_dir, path) = write_config("[providers.openai]\napi_key = \"sk-local\"\n");

    let env = Env::mock([("XDG_CONFIG_HOME", home.path().to_str().unwrap())]);
    let config = Config::load(Some(&path), &env).unwrap();
    let active: Vec<ProviderName> = provider_statuses(&config.providers)
        .into_iter()
        .filter(|s| s.active)
        .map(|s| s.name)
        .collect();
    assert_eq!(active, vec![ProviderName::Nvidia, ProviderName::OpenAI]);
}

#[test]
fn env_key_overrides_file_key() {
    let (_dir, path) = write_config(
        r#"
[providers.openai]
api_key = "sk-file"
"#,
    );
    let env = Env::mock([("OPENAI_API_KEY", "sk-env")]);
    let config = Config::load(Some(&path), &env).unwrap();
    assert_eq!(config.providers.openai.api_key.as_deref(), Some("sk-env"));
}

#[test]
fn cloudflare_without_account_is_reported_inactive() {
    let (_dir, path) = write_config("");
    let env = Env::mock([("CLOUDFLARE_API_KEY", "cf-test")]);
    let config = Config::load(Some(&path), &env).unwrap();
    let statuses = provider_statuses(&config.providers);

    let cloudflare = &statuses[1];
    assert_eq!(cloudflare.name, ProviderName::Cloudflare);
    assert!(!cloudflare.active);
    assert!(
        cloudflare
            .reason
            .as_deref()
            .unwrap()
            .contains("CLOUDFLARE_ACCOUNT_ID")
    );
}

// ---------------------------------------------------------------------------
// serve
// ---------------------------------------------------------------------------

#[test]
fn serve_config_from_file() {
    let (_dir, path) = write_config(
        r#"
[server]
host = "127.0.0.1"
port = 9100
cors_origins = ["https://app.example"]
timeout_secs = 0

[generation]
max_tokens = 512
temperature = 0.1
"#,
    );
    let config = Config::load(Some(&path), &Env::empty()).unwrap();
    assert_eq!(config.server.bind_addr(), "127.0.0.1:9100");
    assert_eq!(config.server.cors_origins, vec!["https://app.example"]);
    assert!(config.server.provider_timeout().is_none());
    assert_eq!(config.generation.max_tokens, 512);
    assert_eq!(config.generation.temperature, 0.1);
}

#[test]
fn serve_orchestrator_matches_statuses() {
    let (_dir, path) = write_config("");
    let env = Env::mock([("TOGETHER_API_KEY", "tg"), ("OPENAI_API_KEY", "sk")]);
    let config = Config::load(Some(&path), &env).unwrap();

    let listed = AiOrchestrator::from_config(&config).list_available_providers();
    let active: Vec<ProviderName> = provider_statuses(&config.providers)
        .into_iter()
        .filter(|s| s.active)
        .map(|s| s.name)
        .collect();
    assert_eq!(listed, active);
}

#[test]
fn missing_explicit_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(Some(&dir.path().join("absent.toml")), &Env::empty()).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn invalid_toml_is_an_error() {
    let (_dir, path) = write_config("[server\nport = ");
    let err = Config::load(Some(&path), &Env::empty()).unwrap_err();
    assert!(matches!(err, ConfigError::ParseFile { .. }));
    assert!(err.to_string().contains("devlift.toml"));
}

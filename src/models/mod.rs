//! Shared types used across all modules.
//!
//! This module defines provider names, generation options, and the
//! request/response schemas of the HTTP API. Other modules import from
//! here rather than reaching into each other's internals.

pub mod request;
pub mod response;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use request::{OptimizationRequest, RefactorRequest, StackTraceRequest, Validate};
pub use response::{ExplanationResponse, OptimizationResponse, RefactorResponse};

/// Supported LLM provider backends.
///
/// Declaration order is the fixed fallback priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderName {
    Nvidia,
    Cloudflare,
    Together,
    #[serde(rename = "openai")]
    OpenAI,
}

impl ProviderName {
    /// All providers in fallback priority order.
    pub const PRIORITY: [ProviderName; 4] = [
        ProviderName::Nvidia,
        ProviderName::Cloudflare,
        ProviderName::Together,
        ProviderName::OpenAI,
    ];

    /// Position in the fallback order (0 is tried first).
    pub fn priority(self) -> usize {
        Self::PRIORITY
            .iter()
            .position(|p| *p == self)
            .unwrap_or(Self::PRIORITY.len())
    }

    /// Human-readable backend name.
    pub fn label(self) -> &'static str {
        match self {
            ProviderName::Nvidia => "NVIDIA NIM",
            ProviderName::Cloudflare => "Cloudflare Workers AI",
            ProviderName::Together => "Together AI",
            ProviderName::OpenAI => "OpenAI",
        }
    }

    /// Prefix shared by this provider's environment variables
    /// (`{PREFIX}_API_KEY`, `{PREFIX}_MODEL`, `{PREFIX}_BASE_URL`).
    pub fn env_prefix(self) -> &'static str {
        match self {
            ProviderName::Nvidia => "NVIDIA",
            ProviderName::Cloudflare => "CLOUDFLARE",
            ProviderName::Together => "TOGETHER",
            ProviderName::OpenAI => "OPENAI",
        }
    }

    /// Environment variable holding the provider credential.
    pub fn api_key_env_var(self) -> String {
        format!("{}_API_KEY", self.env_prefix())
    }

    pub fn default_model(self) -> &'static str {
        match self {
            ProviderName::Nvidia => "meta/llama-3.1-70b-instruct",
            ProviderName::Cloudflare => "@cf/meta/llama-3.1-8b-instruct",
            ProviderName::Together => "meta-llama/Llama-3.3-70B-Instruct-Turbo",
            ProviderName::OpenAI => "gpt-4",
        }
    }

    /// Default API base URL. `None` means the client library's own default.
    pub fn default_base_url(self) -> Option<&'static str> {
        match self {
            ProviderName::Nvidia => Some("https://integrate.api.nvidia.com/v1"),
            ProviderName::Cloudflare => Some("https://api.cloudflare.com/client/v4"),
            ProviderName::Together => Some("https://api.together.xyz/v1"),
            ProviderName::OpenAI => None,
        }
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderName::Nvidia => write!(f, "nvidia"),
            ProviderName::Cloudflare => write!(f, "cloudflare"),
            ProviderName::Together => write!(f, "together"),
            ProviderName::OpenAI => write!(f, "openai"),
        }
    }
}

impl std::str::FromStr for ProviderName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nvidia" => Ok(ProviderName::Nvidia),
            "cloudflare" => Ok(ProviderName::Cloudflare),
            "together" => Ok(ProviderName::Together),
            "openai" => Ok(ProviderName::OpenAI),
            other => Err(format!(
                "unsupported provider: '{other}'. Supported: nvidia, cloudflare, together, openai"
            )),
        }
    }
}

/// Sampling options passed through to every provider call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    pub max_tokens: u64,
    pub temperature: f64,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            max_tokens: 1000,
            temperature: 0.7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_name_display() {
        assert_eq!(ProviderName::Nvidia.to_string(), "nvidia");
        assert_eq!(ProviderName::Cloudflare.to_string(), "cloudflare");
        assert_eq!(ProviderName::Together.to_string(), "together");
        assert_eq!(ProviderName::OpenAI.to_string(), "openai");
    }

    #[test]
    fn provider_name_from_str_case_insensitive() {
        assert_eq!("NVIDIA".parse::<ProviderName>().unwrap(), ProviderName::Nvidia);
        assert_eq!("OpenAI".parse::<ProviderName>().unwrap(), ProviderName::OpenAI);
        assert_eq!(" together ".parse::<ProviderName>().unwrap(), ProviderName::Together);
    }

    #[test]
    fn provider_name_from_str_invalid() {
        let err = "anthropic".parse::<ProviderName>().unwrap_err();
        assert!(err.contains("unsupported provider"));
        assert!(err.contains("anthropic"));
    }

    #[test]
    fn priority_matches_declaration_order() {
        let priorities: Vec<usize> = ProviderName::PRIORITY.iter().map(|p| p.priority()).collect();
        assert_eq!(priorities, vec![0, 1, 2, 3]);
        assert!(ProviderName::Nvidia < ProviderName::OpenAI);
    }

    #[test]
    fn api_key_env_vars() {
        assert_eq!(ProviderName::Nvidia.api_key_env_var(), "NVIDIA_API_KEY");
        assert_eq!(ProviderName::Cloudflare.api_key_env_var(), "CLOUDFLARE_API_KEY");
        assert_eq!(ProviderName::Together.api_key_env_var(), "TOGETHER_API_KEY");
        assert_eq!(ProviderName::OpenAI.api_key_env_var(), "OPENAI_API_KEY");
    }

    #[test]
    fn provider_name_serde_matches_display() {
        for name in ProviderName::PRIORITY {
            let json = serde_json::to_string(&name).unwrap();
            assert_eq!(json, format!("\"{name}\""));
            let back: ProviderName = serde_json::from_str(&json).unwrap();
            assert_eq!(back, name);
        }
    }

    #[test]
    fn only_openai_uses_library_default_base_url() {
        assert!(ProviderName::OpenAI.default_base_url().is_none());
        assert!(ProviderName::Nvidia.default_base_url().is_some());
        assert_eq!(ProviderName::OpenAI.default_model(), "gpt-4");
    }

    #[test]
    fn generate_options_defaults() {
        let opts = GenerateOptions::default();
        assert_eq!(opts.max_tokens, 1000);
        assert!((opts.temperature - 0.7).abs() < f64::EPSILON);
    }
}

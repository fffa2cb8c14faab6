//! LlmProvider trait and provider construction.
//!
//! Each adapter wraps one backend's native call convention behind
//! [`LlmProvider::generate`], returning the assistant text already
//! extracted from that backend's response shape.

pub mod cloudflare;
pub mod rig;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::ProvidersConfig;
use crate::models::{GenerateOptions, ProviderName};

use self::cloudflare::CloudflareProvider;
use self::rig::RigProvider;

/// Errors from a single provider attempt.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{0}")]
    ApiError(String),

    #[error("provider not configured: {0}")]
    NotConfigured(String),

    #[error("unexpected response from {provider}: {detail}")]
    InvalidResponse {
        provider: ProviderName,
        detail: String,
    },

    #[error("{provider} request timed out after {}ms", .elapsed.as_millis())]
    Timeout {
        provider: ProviderName,
        elapsed: Duration,
    },
}

/// Uniform capability implemented once per backend.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Which backend this adapter talks to.
    fn name(&self) -> ProviderName;

    /// Model identifier sent with every request.
    fn model(&self) -> &str;

    /// Send `prompt` and return the assistant's text.
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<String, ProviderError>;
}

/// Activation state of one provider, as reported by `devlift providers`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderStatus {
    pub name: ProviderName,
    pub model: String,
    pub active: bool,
    /// Why the provider is inactive, when it is.
    pub reason: Option<String>,
}

/// Construct one adapter.
///
/// `Ok(None)` means the credential is absent; `Err` means construction
/// failed even though a credential was supplied.
fn construct(
    name: ProviderName,
    config: &ProvidersConfig,
) -> Result<Option<Arc<dyn LlmProvider>>, ProviderError> {
    let settings = config.get(name);
    let provider: Option<Arc<dyn LlmProvider>> = match name {
        ProviderName::Cloudflare => {
            CloudflareProvider::from_settings(settings)?.map(|p| Arc::new(p) as Arc<dyn LlmProvider>)
        }
        ProviderName::Nvidia | ProviderName::Together | ProviderName::OpenAI => {
            RigProvider::from_settings(name, settings)?.map(|p| Arc::new(p) as Arc<dyn LlmProvider>)
        }
    };
    Ok(provider)
}

/// Build the active provider set in fixed priority order.
///
/// Never fails: a provider whose construction errors is logged and left out.
pub fn build_providers(config: &ProvidersConfig) -> Vec<Arc<dyn LlmProvider>> {
    let mut active = Vec::new();
    for name in ProviderName::PRIORITY {
        match construct(name, config) {
            Ok(Some(provider)) => {
                tracing::info!(provider = %name, model = provider.model(), "provider active");
                active.push(provider);
            }
            Ok(None) => {
                tracing::debug!(provider = %name, "provider inactive: no credential");
            }
            Err(e) => {
                tracing::warn!(provider = %name, error = %e, "provider disabled");
            }
        }
    }
    active
}

/// Describe every provider, active or not, in priority order.
pub fn provider_statuses(config: &ProvidersConfig) -> Vec<ProviderStatus> {
    ProviderName::PRIORITY
        .iter()
        .map(|&name| {
            let model = config.get(name).model_for(name);
            let (active, reason) = match construct(name, config) {
                Ok(Some(_)) => (true, None),
                Ok(None) => (false, Some(format!("{} not set", name.api_key_env_var()))),
                Err(e) => (false, Some(e.to_string())),
            };
            ProviderStatus {
                name,
                model,
                active,
                reason,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderSettings;

    fn with_key(key: &str) -> ProviderSettings {
        ProviderSettings {
            api_key: Some(key.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn no_credentials_means_no_providers() {
        let providers = build_providers(&ProvidersConfig::default());
        assert!(providers.is_empty());
    }

    #[test]
    fn providers_are_built_in_priority_order() {
        let config = ProvidersConfig {
            openai: with_key("sk-test"),
            nvidia: with_key("nvapi-test"),
            ..Default::default()
        };
        let providers = build_providers(&config);
        let names: Vec<ProviderName> = providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec![ProviderName::Nvidia, ProviderName::OpenAI]);
        assert_eq!(providers[0].model(), "meta/llama-3.1-70b-instruct");
        assert_eq!(providers[1].model(), "gpt-4");
    }

    #[test]
    fn cloudflare_without_account_is_left_out() {
        let config = ProvidersConfig {
            cloudflare: with_key("cf-token"),
            ..Default::default()
        };
        assert!(build_providers(&config).is_empty());

        let statuses = provider_statuses(&config);
        let cf = statuses
            .iter()
            .find(|s| s.name == ProviderName::Cloudflare)
            .unwrap();
        assert!(!cf.active);
        assert!(cf.reason.as_deref().unwrap().contains("account"));
    }

    #[test]
    fn statuses_cover_every_provider() {
        let config = ProvidersConfig {
            together: with_key("tg-test"),
            ..Default::default()
        };
        let statuses = provider_statuses(&config);
        let names: Vec<ProviderName> = statuses.iter().map(|s| s.name).collect();
        assert_eq!(names, ProviderName::PRIORITY.to_vec());

        let together = &statuses[2];
        assert!(together.active);
        assert!(together.reason.is_none());

        let openai = &statuses[3];
        assert!(!openai.active);
        assert_eq!(openai.reason.as_deref(), Some("OPENAI_API_KEY not set"));
        assert_eq!(openai.model, "gpt-4");
    }

    #[test]
    fn timeout_error_mentions_provider() {
        let err = ProviderError::Timeout {
            provider: ProviderName::Together,
            elapsed: Duration::from_millis(1500),
        };
        assert_eq!(err.to_string(), "together request timed out after 1500ms");
    }
}

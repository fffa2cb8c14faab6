//! AI orchestrator: sequential provider fallback.
//!
//! Providers are tried one at a time in fixed priority order
//! (nvidia, cloudflare, together, openai). The first success wins; each
//! failure is logged and the loop moves on. There is exactly one attempt
//! per provider and no racing.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::config::Config;
use crate::models::{GenerateOptions, ProviderName};
use crate::providers::{self, LlmProvider, ProviderError};

/// Errors from the orchestrator.
#[derive(Error, Debug)]
pub enum OrchestratorError {
    /// Every active provider failed, or none was active.
    #[error("All AI providers failed. Last error: {}", .last_error.as_deref().unwrap_or("None"))]
    AllProvidersFailed { last_error: Option<String> },
}

/// Text produced by the provider that answered.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub provider: ProviderName,
    pub text: String,
}

/// Holds the active providers and runs the fallback loop.
pub struct AiOrchestrator {
    /// Active providers, sorted by priority, one per name.
    providers: Vec<Arc<dyn LlmProvider>>,
    /// Bound on a single attempt; `None` leaves it to the adapter.
    timeout: Option<Duration>,
}

impl AiOrchestrator {
    /// Create an orchestrator over an explicit set of active providers.
    ///
    /// Providers are reordered by priority; a duplicate name keeps its
    /// first occurrence.
    pub fn new(mut providers: Vec<Arc<dyn LlmProvider>>, timeout: Option<Duration>) -> Self {
        providers.sort_by_key(|p| p.name().priority());
        providers.dedup_by_key(|p| p.name());
        Self { providers, timeout }
    }

    /// Build every configured provider and wrap them.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            providers::build_providers(&config.providers),
            config.server.provider_timeout(),
        )
    }

    /// Names of the active providers, in priority order.
    pub fn list_available_providers(&self) -> Vec<ProviderName> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Try each active provider in priority order until one succeeds.
    pub async fn generate_response(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<GenerationResult, OrchestratorError> {
        self.generate_response_with_preference(prompt, options, None)
            .await
    }

    /// Like [`generate_response`](Self::generate_response), but an active
    /// `preferred` provider is tried first. Unknown or inactive names are
    /// ignored and the fixed order applies.
    pub async fn generate_response_with_preference(
        &self,
        prompt: &str,
        options: &GenerateOptions,
        preferred: Option<&str>,
    ) -> Result<GenerationResult, OrchestratorError> {
        let mut last_error: Option<String> = None;

        for provider in self.attempt_order(preferred) {
            let name = provider.name();
            tracing::debug!(provider = %name, "trying provider");

            match self.attempt(provider.as_ref(), prompt, options).await {
                Ok(text) => {
                    tracing::info!(provider = %name, chars = text.len(), "provider succeeded");
                    return Ok(GenerationResult {
                        provider: name,
                        text,
                    });
                }
                Err(e) => {
                    tracing::warn!(provider = %name, error = %e, "provider failed, falling back");
                    last_error = Some(e.to_string());
                }
            }
        }

        Err(OrchestratorError::AllProvidersFailed { last_error })
    }

    /// Run one attempt, bounded by the configured timeout.
    async fn attempt(
        &self,
        provider: &dyn LlmProvider,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<String, ProviderError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, provider.generate(prompt, options))
                .await
                .unwrap_or_else(|_| {
                    Err(ProviderError::Timeout {
                        provider: provider.name(),
                        elapsed: limit,
                    })
                }),
            None => provider.generate(prompt, options).await,
        }
    }

    /// Fixed priority order, with the preferred provider moved to the front.
    fn attempt_order(&self, preferred: Option<&str>) -> Vec<&Arc<dyn LlmProvider>> {
        let mut order: Vec<&Arc<dyn LlmProvider>> = ProviderName::PRIORITY
            .iter()
            .filter_map(|name| self.providers.iter().find(|p| p.name() == *name))
            .collect();

        let Some(raw) = preferred else {
            return order;
        };
        match raw.parse::<ProviderName>() {
            Ok(wanted) => {
                if let Some(pos) = order.iter().position(|p| p.name() == wanted) {
                    let chosen = order.remove(pos);
                    order.insert(0, chosen);
                } else {
                    tracing::debug!(provider = %wanted, "preferred provider inactive, ignoring");
                }
            }
            Err(e) => tracing::debug!(error = %e, "ignoring preferred provider"),
        }
        order
    }
}

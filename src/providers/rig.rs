//! rig-core integration for the OpenAI-compatible backends.
//!
//! NVIDIA NIM, Together AI and OpenAI all speak the OpenAI chat-completions
//! protocol, so one adapter serves all three; only the base URL, model and
//! credential differ. The rig client is built once at construction and
//! reused for every request.

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers;

use crate::config::ProviderSettings;
use crate::constants::SYSTEM_PREAMBLE;
use crate::models::{GenerateOptions, ProviderName};

use super::{LlmProvider, ProviderError};

/// rig-core based provider for chat-completions backends.
pub struct RigProvider {
    name: ProviderName,
    model: String,
    client: providers::openai::CompletionsClient,
}

impl std::fmt::Debug for RigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RigProvider")
            .field("name", &self.name)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl RigProvider {
    /// Build the adapter, or `Ok(None)` when no API key is configured.
    pub fn from_settings(
        name: ProviderName,
        settings: &ProviderSettings,
    ) -> Result<Option<Self>, ProviderError> {
        let Some(api_key) = settings.credential() else {
            return Ok(None);
        };

        let mut builder = providers::openai::CompletionsClient::builder().api_key(api_key);
        if let Some(base_url) = settings.base_url_for(name) {
            builder = builder.base_url(&base_url);
        }
        let client: providers::openai::CompletionsClient = builder.build().map_err(|e| {
            ProviderError::NotConfigured(format!("failed to create {} client: {e}", name.label()))
        })?;

        Ok(Some(Self {
            name,
            model: settings.model_for(name),
            client,
        }))
    }
}

#[async_trait]
impl LlmProvider for RigProvider {
    fn name(&self) -> ProviderName {
        self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<String, ProviderError> {
        let agent = self
            .client
            .agent(self.model.as_str())
            .preamble(SYSTEM_PREAMBLE)
            .temperature(options.temperature)
            .max_tokens(options.max_tokens)
            .build();

        let text = agent
            .prompt(prompt)
            .await
            .map_err(|e| ProviderError::ApiError(format!("{} API error: {e}", self.name.label())))?;

        if text.trim().is_empty() {
            return Err(ProviderError::InvalidResponse {
                provider: self.name,
                detail: "empty completion".to_string(),
            });
        }
        Ok(text)
    }
}

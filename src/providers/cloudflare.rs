//! Cloudflare Workers AI adapter.
//!
//! Calls the native `ai/run` endpoint with reqwest:
//!
//! ```text
//! POST {base_url}/accounts/{account_id}/ai/run/{model}
//! Authorization: Bearer {api_key}
//! ```
//!
//! Workers AI wraps every result in the Cloudflare v4 envelope
//! (`{"result": {...}, "success": bool, "errors": [...]}`), which is
//! unwrapped here.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::ProviderSettings;
use crate::constants::{ENV_CLOUDFLARE_ACCOUNT_ID, SYSTEM_PREAMBLE};
use crate::models::{GenerateOptions, ProviderName};

use super::{LlmProvider, ProviderError};

/// Longest slice of an error body quoted back in error messages.
const ERROR_BODY_PREVIEW_LEN: usize = 500;

/// Cloudflare v4 API envelope.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    result: Option<RunResult>,
    #[serde(default)]
    success: bool,
    #[serde(default)]
    errors: Vec<EnvelopeMessage>,
}

#[derive(Debug, Deserialize)]
struct RunResult {
    #[serde(default)]
    response: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeMessage {
    #[serde(default)]
    code: Option<i64>,
    message: String,
}

/// Workers AI text-generation provider.
pub struct CloudflareProvider {
    http: reqwest::Client,
    base_url: String,
    account_id: String,
    api_key: String,
    model: String,
}

impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("base_url", &self.base_url)
            .field("account_id", &self.account_id)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl CloudflareProvider {
    /// Build the adapter, or `Ok(None)` when no API token is configured.
    ///
    /// A token without an account id cannot address any model and is
    /// reported as `NotConfigured`.
    pub fn from_settings(settings: &ProviderSettings) -> Result<Option<Self>, ProviderError> {
        let Some(api_key) = settings.credential().map(str::to_string) else {
            return Ok(None);
        };
        let account_id = settings.account().map(str::to_string).ok_or_else(|| {
            ProviderError::NotConfigured(format!(
                "Cloudflare requires an account id. Set {ENV_CLOUDFLARE_ACCOUNT_ID} or providers.cloudflare.account_id."
            ))
        })?;
        let base_url = settings
            .base_url_for(ProviderName::Cloudflare)
            .unwrap_or_default()
            .trim_end_matches('/')
            .to_string();
        let http = reqwest::Client::builder().build().map_err(|e| {
            ProviderError::NotConfigured(format!("failed to create Cloudflare client: {e}"))
        })?;

        Ok(Some(Self {
            http,
            base_url,
            account_id,
            api_key,
            model: settings.model_for(ProviderName::Cloudflare),
        }))
    }

    /// Full URL of the `ai/run` endpoint for the configured model.
    pub fn run_url(&self) -> String {
        format!(
            "{}/accounts/{}/ai/run/{}",
            self.base_url, self.account_id, self.model
        )
    }
}

#[async_trait]
impl LlmProvider for CloudflareProvider {
    fn name(&self) -> ProviderName {
        ProviderName::Cloudflare
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<String, ProviderError> {
        let body = serde_json::json!({
            "messages": [
                { "role": "system", "content": SYSTEM_PREAMBLE },
                { "role": "user", "content": prompt },
            ],
            "max_tokens": options.max_tokens,
            "temperature": options.temperature,
        });

        let response = self
            .http
            .post(self.run_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Cloudflare API error: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Cloudflare API error: {e}")))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<Envelope>(&text)
                .ok()
                .and_then(|env| join_errors(&env.errors))
                .unwrap_or_else(|| text.chars().take(ERROR_BODY_PREVIEW_LEN).collect());
            return Err(ProviderError::ApiError(format!(
                "Cloudflare API error: HTTP {status}: {detail}"
            )));
        }

        extract_text(&text)
    }
}

fn join_errors(errors: &[EnvelopeMessage]) -> Option<String> {
    if errors.is_empty() {
        return None;
    }
    let parts: Vec<String> = errors
        .iter()
        .map(|e| match e.code {
            Some(code) => format!("{} (code {code})", e.message),
            None => e.message.clone(),
        })
        .collect();
    Some(parts.join("; "))
}

/// Pull the generated text out of a successful `ai/run` body.
fn extract_text(body: &str) -> Result<String, ProviderError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| ProviderError::InvalidResponse {
            provider: ProviderName::Cloudflare,
            detail: format!("malformed envelope: {e}"),
        })?;

    if !envelope.success {
        let detail = join_errors(&envelope.errors).unwrap_or_else(|| "success=false".to_string());
        return Err(ProviderError::ApiError(format!("Cloudflare API error: {detail}")));
    }

    envelope
        .result
        .and_then(|r| r.response)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| ProviderError::InvalidResponse {
            provider: ProviderName::Cloudflare,
            detail: "missing result.response".to_string(),
        })
}

//! `/explain` routes.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::models::{ExplanationResponse, StackTraceRequest};
use crate::{normalize, prompts};

use super::AppState;
use super::error::{ApiError, ValidatedJson};

/// `POST /explain/stacktrace`
pub async fn explain_stacktrace(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<StackTraceRequest>,
) -> Result<Json<ExplanationResponse>, ApiError> {
    let prompt = prompts::build_stacktrace_prompt(
        &request.stack_trace,
        request.language.as_deref(),
        request.framework.as_deref(),
    );

    let result = state
        .orchestrator
        .generate_response_with_preference(
            &prompt,
            &state.generation,
            request.preferred_provider.as_deref(),
        )
        .await
        .map_err(|source| ApiError::Generation {
            context: "Failed to analyze stack trace",
            source,
        })?;

    Ok(Json(normalize::normalize_explanation(
        &result.text,
        result.provider,
    )))
}

/// `GET /explain/providers`
pub async fn list_providers(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "providers": state.orchestrator.list_available_providers() }))
}

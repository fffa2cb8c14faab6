//! `/refactor` routes.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use crate::models::{RefactorRequest, RefactorResponse};
use crate::{normalize, prompts};

use super::AppState;
use super::error::{ApiError, ValidatedJson};

/// `POST /refactor/modernize`
pub async fn modernize_code(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<RefactorRequest>,
) -> Result<Json<RefactorResponse>, ApiError> {
    let prompt = prompts::build_refactor_prompt(
        &request.code,
        &request.source_language,
        &request.source_version,
        &request.target_version,
        request.preserve_comments,
        &request.modernization_level,
    );

    let result = state
        .orchestrator
        .generate_response(&prompt, &state.generation)
        .await
        .map_err(|source| ApiError::Generation {
            context: "Failed to refactor code",
            source,
        })?;

    Ok(Json(normalize::normalize_refactor(&result.text)))
}

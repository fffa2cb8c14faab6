//! `/optimize` routes.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use crate::models::{OptimizationRequest, OptimizationResponse};
use crate::{normalize, prompts};

use super::AppState;
use super::error::{ApiError, ValidatedJson};

/// `POST /optimize/dsa`
pub async fn optimize_algorithm(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<OptimizationRequest>,
) -> Result<Json<OptimizationResponse>, ApiError> {
    let prompt = prompts::build_optimizer_prompt(
        &request.code,
        &request.language,
        request.algorithm_type.as_deref(),
        request.expected_complexity.as_deref(),
        request.include_explanation,
    );

    let result = state
        .orchestrator
        .generate_response(&prompt, &state.generation)
        .await
        .map_err(|source| ApiError::Generation {
            context: "Failed to optimize algorithm",
            source,
        })?;

    Ok(Json(normalize::normalize_optimization(&result.text)))
}

//! Structured responses returned by the HTTP API.
//!
//! `RefactorResponse` and `OptimizationResponse` double as the JSON shape
//! the prompts ask the model to produce, so they derive `Deserialize` too.
//! `ExplanationResponse` carries `provider_used`, which the model never
//! supplies, so it is only serialized.

use serde::{Deserialize, Serialize};

use super::ProviderName;

/// Response of `POST /explain/stacktrace`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplanationResponse {
    pub explanation: String,
    pub possible_fixes: Vec<String>,
    pub references: Option<Vec<String>>,
    /// Provider whose output backs this response.
    pub provider_used: ProviderName,
}

/// Response of `POST /refactor/modernize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefactorResponse {
    pub refactored_code: String,
    pub changes_made: Vec<String>,
    #[serde(default)]
    pub migration_notes: Option<String>,
}

/// Response of `POST /optimize/dsa`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResponse {
    pub optimized_code: String,
    pub time_complexity_before: String,
    pub time_complexity_after: String,
    pub space_complexity_before: String,
    pub space_complexity_after: String,
    #[serde(default)]
    pub explanation: Option<String>,
    pub optimization_techniques: Vec<String>,
}

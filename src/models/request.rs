//! Request bodies accepted by the HTTP API.
//!
//! Deserialization enforces presence and type of every required field;
//! [`Validate`] additionally rejects required strings that are blank.

use serde::Deserialize;

/// Post-deserialization checks run before any prompt is built.
pub trait Validate {
    /// Return a human-readable reason when the request is unusable.
    fn validate(&self) -> Result<(), String>;
}

fn require_non_blank(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("field `{field}` must not be empty"));
    }
    Ok(())
}

fn default_true() -> bool {
    true
}

fn default_modernization_level() -> String {
    "moderate".to_string()
}

/// `POST /explain/stacktrace`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StackTraceRequest {
    pub stack_trace: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub framework: Option<String>,
    /// Provider to try first, when active. Unknown names are ignored.
    #[serde(default)]
    pub preferred_provider: Option<String>,
}

impl Validate for StackTraceRequest {
    fn validate(&self) -> Result<(), String> {
        require_non_blank("stack_trace", &self.stack_trace)
    }
}

/// `POST /refactor/modernize`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RefactorRequest {
    pub code: String,
    pub source_language: String,
    pub source_version: String,
    pub target_version: String,
    #[serde(default = "default_true")]
    pub preserve_comments: bool,
    /// Free-form; typically `conservative`, `moderate` or `aggressive`.
    #[serde(default = "default_modernization_level")]
    pub modernization_level: String,
}

impl Validate for RefactorRequest {
    fn validate(&self) -> Result<(), String> {
        require_non_blank("code", &self.code)?;
        require_non_blank("source_language", &self.source_language)?;
        require_non_blank("source_version", &self.source_version)?;
        require_non_blank("target_version", &self.target_version)
    }
}

/// `POST /optimize/dsa`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OptimizationRequest {
    pub code: String,
    pub language: String,
    /// sorting, searching, graph, ...
    #[serde(default)]
    pub algorithm_type: Option<String>,
    /// O(n), O(log n), ...
    #[serde(default)]
    pub expected_complexity: Option<String>,
    #[serde(default = "default_true")]
    pub include_explanation: bool,
}

impl Validate for OptimizationRequest {
    fn validate(&self) -> Result<(), String> {
        require_non_blank("code", &self.code)?;
        require_non_blank("language", &self.language)
    }
}

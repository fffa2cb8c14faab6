//! Response normalization: model text → endpoint schema.
//!
//! Two strategies, tried in order:
//!
//! 1. Structured parse: the text (or a JSON object embedded in it, or the
//!    content of a markdown fence) deserializes into the endpoint schema.
//!    Fields are copied through verbatim.
//! 2. Heuristic fallback: lossy plain-text parsing that always yields a
//!    well-formed response.
//!
//! Nothing in this module returns an error.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::models::{ExplanationResponse, OptimizationResponse, ProviderName, RefactorResponse};

/// Placeholder complexity used when the model's answer is not structured.
const PLACEHOLDER_TIME: &str = "O(n)";
const PLACEHOLDER_SPACE: &str = "O(1)";

/// Regex for extracting content inside markdown code fences.
///
/// The closing ``` must appear at the start of a line so triple-backticks
/// inside a single line of prose do not terminate the block.
static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```([\w+#.-]*)[ \t]*\r?\n(.*?)\r?\n[ \t]*```").unwrap()
});

/// Shape the stack-trace prompt asks for; `provider_used` is added by us.
#[derive(Debug, Deserialize)]
struct ExplanationPayload {
    explanation: String,
    possible_fixes: Vec<String>,
    #[serde(default)]
    references: Option<Vec<String>>,
}

/// Normalize text answering the stack-trace prompt.
pub fn normalize_explanation(text: &str, provider: ProviderName) -> ExplanationResponse {
    if let Some(payload) = parse_structured::<ExplanationPayload>(text) {
        return ExplanationResponse {
            explanation: payload.explanation,
            possible_fixes: payload.possible_fixes,
            references: payload.references,
            provider_used: provider,
        };
    }

    // Paragraphs: explanation, then fixes, then references.
    let text = text.replace("\r\n", "\n");
    let parts: Vec<&str> = text.trim().split("\n\n").collect();

    let explanation = parts
        .first()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .unwrap_or("No explanation provided")
        .to_string();
    let possible_fixes = parts.get(1).map(|p| non_empty_lines(p)).unwrap_or_default();
    let references = parts.get(2).map(|p| non_empty_lines(p)).unwrap_or_default();

    ExplanationResponse {
        explanation,
        possible_fixes,
        references: Some(references),
        provider_used: provider,
    }
}

/// Normalize text answering the refactor prompt.
pub fn normalize_refactor(text: &str) -> RefactorResponse {
    if let Some(response) = parse_structured::<RefactorResponse>(text) {
        return response;
    }

    let trimmed = text.trim();
    let first_block = FENCE_RE
        .captures(trimmed)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str().to_string());

    match first_block {
        Some(refactored_code) => {
            let prose = FENCE_RE.replace_all(trimmed, "");
            let changes_made = prose.lines().filter_map(strip_list_marker).collect();
            RefactorResponse {
                refactored_code,
                changes_made,
                migration_notes: None,
            }
        }
        None => RefactorResponse {
            refactored_code: trimmed.to_string(),
            changes_made: Vec::new(),
            migration_notes: None,
        },
    }
}

/// Normalize text answering the optimizer prompt.
pub fn normalize_optimization(text: &str) -> OptimizationResponse {
    if let Some(response) = parse_structured::<OptimizationResponse>(text) {
        return response;
    }

    let trimmed = text.trim();
    OptimizationResponse {
        optimized_code: trimmed.lines().next().unwrap_or_default().to_string(),
        time_complexity_before: PLACEHOLDER_TIME.to_string(),
        time_complexity_after: PLACEHOLDER_TIME.to_string(),
        space_complexity_before: PLACEHOLDER_SPACE.to_string(),
        space_complexity_after: PLACEHOLDER_SPACE.to_string(),
        explanation: (!trimmed.is_empty()).then(|| trimmed.to_string()),
        optimization_techniques: vec!["General optimization".to_string()],
    }
}

/// Deserialize the first JSON candidate that matches `T`.
fn parse_structured<T: DeserializeOwned>(text: &str) -> Option<T> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    extract_json_candidates(trimmed)
        .iter()
        .find_map(|candidate| serde_json::from_str::<T>(candidate).ok())
}

/// Extract candidate JSON strings from a response.
///
/// Returns the text itself, the span from the first `{` to the last `}`,
/// and the content of every markdown code fence, in that order.
fn extract_json_candidates(text: &str) -> Vec<String> {
    let mut candidates = vec![text.to_string()];

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            let slice = &text[start..=end];
            if slice != text {
                candidates.push(slice.to_string());
            }
        }
    }

    for caps in FENCE_RE.captures_iter(text) {
        if let Some(inner) = caps.get(2) {
            let inner = inner.as_str().trim();
            if !inner.is_empty() {
                candidates.push(inner.to_string());
            }
        }
    }

    candidates
}

fn non_empty_lines(paragraph: &str) -> Vec<String> {
    paragraph
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// `- foo`, `* foo`, `• foo`, `1. foo`, `2) foo` → `foo`.
fn strip_list_marker(line: &str) -> Option<String> {
    let trimmed = line.trim();
    let rest = ["- ", "* ", "• "]
        .iter()
        .find_map(|marker| trimmed.strip_prefix(marker))
        .or_else(|| {
            let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
            if digits == 0 {
                return None;
            }
            let after = &trimmed[digits..];
            after.strip_prefix(". ").or_else(|| after.strip_prefix(") "))
        })?;
    let rest = rest.trim();
    (!rest.is_empty()).then(|| rest.to_string())
}

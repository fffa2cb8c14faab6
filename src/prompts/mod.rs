//! Prompt templates for each use case.
//!
//! Every builder is a pure function: it joins a fixed instruction preamble,
//! the user's content, and a trailing directive spelling out the exact JSON
//! shape the model must answer with. Required fields are validated at the
//! HTTP boundary before these are called.

const STACKTRACE_FORMAT: &str = r#"
{
    "explanation": "Clear explanation of what's happening",
    "possible_fixes": ["Fix 1", "Fix 2", ...],
    "references": ["URL 1", "URL 2", ...]
}
"#;

const REFACTOR_FORMAT: &str = r#"
{
    "refactored_code": "The complete refactored code",
    "changes_made": ["Change 1", "Change 2", ...],
    "migration_notes": "Any additional notes about the refactoring"
}
"#;

const OPTIMIZER_FORMAT: &str = r#"
{
    "optimized_code": "The optimized code",
    "time_complexity_before": "Original time complexity",
    "time_complexity_after": "New time complexity",
    "space_complexity_before": "Original space complexity",
    "space_complexity_after": "New space complexity",
    "explanation": "Detailed explanation of the optimizations",
    "optimization_techniques": ["Technique 1", "Technique 2", ...]
}
"#;

/// Build the prompt for explaining an error stack trace.
pub fn build_stacktrace_prompt(
    stack_trace: &str,
    language: Option<&str>,
    framework: Option<&str>,
) -> String {
    let mut lines: Vec<String> = vec![
        "You are an expert debugging assistant that helps developers understand error stack traces."
            .to_string(),
        "Please analyze the following stack trace and provide:".to_string(),
        "1. A clear explanation of what caused the error".to_string(),
        "2. Step-by-step suggestions to fix the issue".to_string(),
        "3. References to documentation if relevant".to_string(),
        "\n\nStack Trace:\n".to_string(),
        stack_trace.to_string(),
    ];

    if let Some(language) = language {
        lines.push(format!("\nLanguage: {language}"));
    }
    if let Some(framework) = framework {
        lines.push(format!("\nFramework: {framework}"));
    }

    lines.push("\nPlease format your response as JSON with the following structure:".to_string());
    lines.push(STACKTRACE_FORMAT.to_string());

    lines.join("\n")
}

/// Build the prompt for modernizing code from one language version to another.
pub fn build_refactor_prompt(
    code: &str,
    source_language: &str,
    source_version: &str,
    target_version: &str,
    preserve_comments: bool,
    modernization_level: &str,
) -> String {
    let lines: Vec<String> = vec![
        format!("You are an expert {source_language} developer tasked with modernizing code."),
        format!(
            "Please refactor the following {source_language} {source_version} code to use {target_version} features."
        ),
        format!("\nModernization level: {}", modernization_level.to_uppercase()),
        format!(
            "Preserve comments: {}",
            if preserve_comments { "Yes" } else { "No" }
        ),
        "\nOriginal code:\n".to_string(),
        "```".to_string(),
        code.to_string(),
        "```".to_string(),
        "\nPlease refactor this code to use modern features and best practices.".to_string(),
        "For each change you make, briefly explain the reasoning behind it.".to_string(),
        "Format your response as JSON with the following structure:".to_string(),
        REFACTOR_FORMAT.to_string(),
    ];

    lines.join("\n")
}

/// Build the prompt for optimizing an algorithm's time and space complexity.
pub fn build_optimizer_prompt(
    code: &str,
    language: &str,
    algorithm_type: Option<&str>,
    expected_complexity: Option<&str>,
    include_explanation: bool,
) -> String {
    let mut lines: Vec<String> = vec![
        "You are an expert algorithm optimization assistant.".to_string(),
        format!(
            "Please analyze and optimize the following {language} code for better time and space complexity:"
        ),
        "\n```".to_string(),
        code.to_string(),
        "```\n".to_string(),
    ];

    if let Some(algorithm_type) = algorithm_type {
        lines.push(format!("Algorithm type: {algorithm_type}"));
    }
    if let Some(expected) = expected_complexity {
        lines.push(format!("Target complexity: {expected}"));
    }

    lines.push("\nPlease provide:".to_string());
    lines.push("1. The optimized code".to_string());
    lines.push("2. The time complexity before and after optimization".to_string());
    lines.push("3. The space complexity before and after optimization".to_string());
    if include_explanation {
        lines.push("4. A detailed explanation of the optimizations made".to_string());
    }
    lines.push("5. A list of the optimization techniques used".to_string());

    lines.push("\nFormat your response as JSON with the following structure:".to_string());
    lines.push(OPTIMIZER_FORMAT.to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stacktrace_prompt_embeds_trace_and_format() {
        let prompt = build_stacktrace_prompt("NullPointerException at Foo.java:12", None, None);
        assert!(prompt.starts_with("You are an expert debugging assistant"));
        assert!(prompt.contains("Stack Trace:\n\nNullPointerException at Foo.java:12"));
        assert!(prompt.contains("\"possible_fixes\""));
        assert!(!prompt.contains("Language:"));
        assert!(!prompt.contains("Framework:"));
    }

    #[test]
    fn stacktrace_prompt_includes_optional_metadata() {
        let prompt = build_stacktrace_prompt("trace", Some("Java"), Some("Spring"));
        assert!(prompt.contains("\nLanguage: Java"));
        assert!(prompt.contains("\nFramework: Spring"));
        let lang = prompt.find("Language:").unwrap();
        let fw = prompt.find("Framework:").unwrap();
        let directive = prompt.find("Please format your response").unwrap();
        assert!(lang < fw && fw < directive);
    }

    #[test]
    fn refactor_prompt_uppercases_level_and_fences_code() {
        let prompt = build_refactor_prompt(
            "for (int i = 0; i < n; i++) {}",
            "Java",
            "Java 8",
            "Java 21",
            true,
            "aggressive",
        );
        assert!(prompt.starts_with("You are an expert Java developer"));
        assert!(prompt.contains("refactor the following Java Java 8 code to use Java 21 features"));
        assert!(prompt.contains("Modernization level: AGGRESSIVE"));
        assert!(prompt.contains("Preserve comments: Yes"));
        assert!(prompt.contains("```\nfor (int i = 0; i < n; i++) {}\n```"));
        assert!(prompt.contains("\"refactored_code\""));
    }

    #[test]
    fn refactor_prompt_without_comments() {
        let prompt = build_refactor_prompt("x", "Python", "2.7", "3.12", false, "moderate");
        assert!(prompt.contains("Preserve comments: No"));
    }

    #[test]
    fn optimizer_prompt_with_everything() {
        let prompt = build_optimizer_prompt(
            "def f(x): return x",
            "python",
            Some("sorting"),
            Some("O(n log n)"),
            true,
        );
        assert!(prompt.contains("optimize the following python code"));
        assert!(prompt.contains("\n```\ndef f(x): return x\n```\n"));
        assert!(prompt.contains("Algorithm type: sorting"));
        assert!(prompt.contains("Target complexity: O(n log n)"));
        assert!(prompt.contains("4. A detailed explanation"));
        assert!(prompt.contains("\"optimization_techniques\""));
    }

    #[test]
    fn optimizer_prompt_skips_explanation_item() {
        let prompt = build_optimizer_prompt("x", "rust", None, None, false);
        assert!(!prompt.contains("4. A detailed explanation"));
        assert!(prompt.contains("5. A list of the optimization techniques used"));
        assert!(!prompt.contains("Algorithm type:"));
        assert!(!prompt.contains("Target complexity:"));
    }

    #[test]
    fn builders_are_deterministic() {
        let a = build_optimizer_prompt("x", "go", Some("graph"), None, true);
        let b = build_optimizer_prompt("x", "go", Some("graph"), None, true);
        assert_eq!(a, b);
    }
}

//! CLI command definitions and terminal output.
//!
//! Uses clap derive macros for ergonomic argument definitions.

pub mod args;

use devlift::models::ProviderName;
use devlift::providers::ProviderStatus;

/// Print the startup banner to stderr.
pub fn print_banner(addr: &str, active: &[ProviderName]) {
    use colored::Colorize;
    use std::io::Write;
    let stderr = std::io::stderr();
    let mut handle = stderr.lock();
    let _ = writeln!(handle);
    let _ = writeln!(
        handle,
        "  {} {}",
        "devlift".bold(),
        format!("· listening on http://{addr}").dimmed(),
    );
    let providers = if active.is_empty() {
        "none (every request will fail)".yellow().to_string()
    } else {
        active
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(" → ")
    };
    let _ = writeln!(handle, "  {} {}", "providers:".dimmed(), providers);
    let _ = writeln!(handle);
    let _ = handle.flush();
}

/// Render one line of `devlift providers` output.
pub fn format_status(status: &ProviderStatus) -> String {
    use colored::Colorize;
    let marker = if status.active {
        "●".green().to_string()
    } else {
        "○".dimmed().to_string()
    };
    let detail = match &status.reason {
        Some(reason) => format!("inactive: {reason}").dimmed().to_string(),
        None => "active".green().to_string(),
    };
    format!(
        "  {marker} {:<11} {:<40} {detail}",
        status.name.to_string(),
        status.model
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_banner_without_providers() {
        print_banner("0.0.0.0:8000", &[]);
    }

    #[test]
    fn print_banner_with_providers() {
        print_banner(
            "127.0.0.1:9000",
            &[ProviderName::Nvidia, ProviderName::OpenAI],
        );
    }

    #[test]
    fn format_status_shows_reason() {
        colored::control::set_override(false);
        let line = format_status(&ProviderStatus {
            name: ProviderName::OpenAI,
            model: "gpt-4".to_string(),
            active: false,
            reason: Some("OPENAI_API_KEY not set".to_string()),
        });
        assert!(line.contains("openai"));
        assert!(line.contains("gpt-4"));
        assert!(line.contains("inactive: OPENAI_API_KEY not set"));
    }

    #[test]
    fn format_status_active() {
        colored::control::set_override(false);
        let line = format_status(&ProviderStatus {
            name: ProviderName::Together,
            model: "meta-llama/Llama-3.3-70B-Instruct-Turbo".to_string(),
            active: true,
            reason: None,
        });
        assert!(line.ends_with("active"));
    }
}

//! tracing-subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::constants::DEFAULT_LOG_FILTER;
use crate::env::Env;

/// Pick the filter directive: `RUST_LOG` wins over `fallback`.
pub fn filter_directive(env: &Env, fallback: &str) -> String {
    env.non_empty("RUST_LOG")
        .unwrap_or_else(|| fallback.to_string())
}

/// Build an [`EnvFilter`], using the built-in default for a bad directive.
pub fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|e| {
        eprintln!("invalid log filter {directive:?} ({e}), using {DEFAULT_LOG_FILTER:?}");
        EnvFilter::new(DEFAULT_LOG_FILTER)
    })
}

/// Install the global fmt subscriber, writing to stderr.
pub fn init_tracing(
    env: &Env,
    fallback: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = build_filter(&filter_directive(env, fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_overrides_fallback() {
        let env = Env::mock([("RUST_LOG", "devlift=trace")]);
        assert_eq!(filter_directive(&env, "info"), "devlift=trace");
    }

    #[test]
    fn fallback_used_without_rust_log() {
        assert_eq!(filter_directive(&Env::empty(), "warn"), "warn");
        let blank = Env::mock([("RUST_LOG", "  ")]);
        assert_eq!(filter_directive(&blank, "warn"), "warn");
    }

    #[test]
    fn bad_directive_falls_back_to_default() {
        let filter = build_filter("devlift=notalevel");
        assert!(filter.to_string().contains("devlift"));
    }
}

//! App-wide constants.
//!
//! Centralises the service name, config paths, environment variable names,
//! and default network settings so a rename only requires changing this file.

/// Display name of the service (lowercase).
pub const APP_NAME: &str = "devlift";

/// Crate version, as reported by `devlift version` and `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compilation target triple, exported by `build.rs`.
pub const TARGET: &str = env!("TARGET");

/// Local config filename (e.g. `.devlift.toml` in the working directory).
pub const CONFIG_FILENAME: &str = ".devlift.toml";

/// Directory name under `~/.config/` for global config.
pub const CONFIG_DIR: &str = "devlift";

/// System preamble sent to every provider ahead of the user prompt.
pub const SYSTEM_PREAMBLE: &str = "You are DevLift, an AI assistant that helps developers \
    with debugging, refactoring, and optimizing code.";

/// Frontend origins allowed by CORS unless overridden in config.
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:5173", "https://devlift.vercel.app"];

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Per-provider attempt timeout, in seconds. `0` disables the bound.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Tracing filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "devlift=info,tower_http=info";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_HOST: &str = "DEVLIFT_HOST";
pub const ENV_PORT: &str = "DEVLIFT_PORT";
pub const ENV_TIMEOUT_SECS: &str = "DEVLIFT_TIMEOUT_SECS";
pub const ENV_CORS_ORIGINS: &str = "DEVLIFT_CORS_ORIGINS";
pub const ENV_CLOUDFLARE_ACCOUNT_ID: &str = "CLOUDFLARE_ACCOUNT_ID";

//! Clap argument types.

use clap::Parser;
use std::path::PathBuf;

use devlift::constants::{DEFAULT_LOG_FILTER, ENV_HOST, ENV_PORT};

/// Multi-provider LLM gateway for stack traces, refactoring and optimization.
#[derive(Parser, Debug)]
#[command(name = "devlift", version = devlift::constants::VERSION, about)]
pub struct Cli {
    /// tracing filter directive. `RUST_LOG` takes precedence.
    #[arg(long, global = true, default_value = DEFAULT_LOG_FILTER)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API server.
    Serve(ServeArgs),

    /// Show which providers are active, in fallback order.
    Providers(ProvidersArgs),

    /// Print version and build information.
    Version,
}

/// Arguments for the `serve` subcommand.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind (overrides config and `DEVLIFT_HOST`).
    #[arg(long, env = ENV_HOST)]
    pub host: Option<String>,

    /// Port to bind (overrides config and `DEVLIFT_PORT`).
    #[arg(long, env = ENV_PORT)]
    pub port: Option<u16>,

    /// Config file to use instead of `./.devlift.toml`.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `providers` subcommand.
#[derive(Parser, Debug)]
pub struct ProvidersArgs {
    /// Config file to use instead of `./.devlift.toml`.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

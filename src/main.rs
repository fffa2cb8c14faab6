//! devlift: multi-provider LLM gateway.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use devlift::config;
use devlift::constants;
use devlift::env;
use devlift::logging;
use devlift::providers;
use devlift::server;

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Command, ProvidersArgs, ServeArgs};
use config::Config;
use env::Env;
use server::AppState;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => run_serve(args, &cli.log_level).await,
        Command::Providers(args) => run_providers(args),
        Command::Version => run_version(),
    }
}

/// Print detailed version and build information.
fn run_version() -> Result<()> {
    use colored::Colorize;

    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    println!("{}     {}", "target:".dimmed(), constants::TARGET);
    Ok(())
}

/// List every provider with its activation state.
fn run_providers(args: ProvidersArgs) -> Result<()> {
    use colored::Colorize;

    let env = Env::real();
    let config =
        Config::load(args.config.as_deref(), &env).context("failed to load configuration")?;

    let statuses = providers::provider_statuses(&config.providers);
    let active = statuses.iter().filter(|s| s.active).count();

    println!("{}", "Providers (fallback order):".bold());
    for status in &statuses {
        println!("{}", cli::format_status(status));
    }
    println!();
    println!(
        "{} of {} providers active",
        active.to_string().bold(),
        statuses.len()
    );
    Ok(())
}

/// Load config, build the orchestrator and serve the HTTP API.
async fn run_serve(args: ServeArgs, log_level: &str) -> Result<()> {
    let env = Env::real();
    logging::init_tracing(&env, log_level)
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to initialise logging")?;

    let mut config =
        Config::load(args.config.as_deref(), &env).context("failed to load configuration")?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let state = Arc::new(AppState::from_config(&config));
    let active = state.orchestrator.list_available_providers();
    if active.is_empty() {
        tracing::warn!("no provider has a credential configured");
    }
    cli::print_banner(&config.server.bind_addr(), &active);

    server::serve(&config, state)
        .await
        .with_context(|| format!("server on {} failed", config.server.bind_addr()))
}

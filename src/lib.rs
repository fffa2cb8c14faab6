//! devlift: multi-provider LLM gateway (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod config;
pub mod constants;
pub mod env;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod orchestrator;
pub mod prompts;
pub mod providers;
pub mod server;

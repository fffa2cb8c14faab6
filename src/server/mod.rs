//! HTTP surface: axum router, shared state and CORS.

pub mod error;
pub mod explain;
pub mod optimize;
pub mod refactor;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::models::GenerateOptions;
use crate::orchestrator::AiOrchestrator;

pub use error::{ApiError, ValidatedJson};

/// State shared by every handler. Built once at startup, never mutated.
pub struct AppState {
    pub orchestrator: AiOrchestrator,
    pub generation: GenerateOptions,
}

impl AppState {
    pub fn new(orchestrator: AiOrchestrator, generation: GenerateOptions) -> Self {
        Self {
            orchestrator,
            generation,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(AiOrchestrator::from_config(config), config.generation)
    }
}

/// Build the full router with CORS restricted to `cors_origins`.
pub fn build_router(state: Arc<AppState>, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/explain/stacktrace", post(explain::explain_stacktrace))
        .route("/explain/providers", get(explain::list_providers))
        .route("/refactor/modernize", post(refactor::modernize_code))
        .route("/optimize/dsa", post(optimize::optimize_algorithm))
        .route("/health", get(health))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> axum::Json<Value> {
    axum::Json(json!({ "status": "healthy" }))
}

/// Exact-origin CORS with credentials. Unparseable origins are skipped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(%origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Bind `config.server.bind_addr()` and serve until Ctrl-C.
pub async fn serve(config: &Config, state: Arc<AppState>) -> std::io::Result<()> {
    let app = build_router(state, &config.server.cors_origins);
    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

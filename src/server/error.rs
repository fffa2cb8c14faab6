//! HTTP error mapping and the validating JSON extractor.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::Validate;
use crate::orchestrator::OrchestratorError;

/// Errors a handler can return. Every variant renders as `{"detail": ...}`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed body, missing field, wrong type or blank required string.
    #[error("{0}")]
    Validation(String),

    /// No provider produced an answer.
    #[error("{context}: {source}")]
    Generation {
        context: &'static str,
        source: OrchestratorError,
    },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Generation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();
        match &self {
            ApiError::Validation(_) => tracing::debug!(%detail, "rejected request"),
            ApiError::Generation { .. } => tracing::error!(%detail, "request failed"),
        }
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

/// `Json<T>` that also runs [`Validate`] before the handler sees the value.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| ApiError::Validation(rejection.body_text()))?;
        value.validate().map_err(ApiError::Validation)?;
        Ok(Self(value))
    }
}

//! API error types
//!
//! Maps the pipeline's failure classes onto HTTP statuses:
//! invalid client input → 400, upstream geodata unreachable → 502,
//! structurally invalid upstream payload → 500. Image-provider failures are
//! never surfaced here; they degrade inside the resolver chain.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::overpass_client::FetchError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Missing or invalid credentials (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Conflict (409) - e.g. duplicate registration
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Upstream geodata provider unreachable or returned an error status (502)
    #[error("Upstream provider unavailable: {0}")]
    BadGateway(String),

    /// Upstream provider returned a structurally invalid payload (500)
    #[error("Upstream data invalid: {0}")]
    UpstreamData(String),

    /// Database error
    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Unreachable(_) | FetchError::Status(_, _) => {
                ApiError::BadGateway(err.to_string())
            }
            FetchError::InvalidPayload(_) => ApiError::UpstreamData(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "UPSTREAM_UNAVAILABLE", msg),
            ApiError::UpstreamData(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_DATA_INVALID", msg)
            }
            ApiError::Db(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                err.to_string(),
            ),
            ApiError::Other(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                err.to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

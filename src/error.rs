//! Application error type and its HTTP mapping.
//!
//! Handlers return `Result<T, AppError>`; axum converts the `Err` arm into a
//! response through the `IntoResponse` impl below. The wire shape is always
//! `{"error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Every failure a request handler can surface.
///
/// The streak engine itself never produces errors; these all originate at the
/// validation or storage boundary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Unknown id (HTTP 404).
    #[error("Resource not found")]
    NotFound,

    /// Missing or malformed request field (HTTP 400).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Uniqueness violation (HTTP 409).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Storage failure (HTTP 500). Converted automatically from sqlx errors
    /// via `?`; the underlying message is logged, not sent to the client.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

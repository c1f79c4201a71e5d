//! Application error type and its HTTP mapping.
//!
//! Every fallible path in the service funnels into [`AppError`]; the
//! [`IntoResponse`] impl decides the status code and the JSON body the
//! caller sees. Anything marked internal is logged here and reported to the
//! client only as a generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A query or connection failed in sqlx.
    ///
    /// `#[from]` lets store code bubble these up with `?`. The caller gets
    /// a generic 500; the underlying error goes to the server log only.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Credential is missing, malformed, invalid, or inactive.
    ///
    /// Returns HTTP 401 Unauthorized. A single variant covers every
    /// credential failure: the response must not let a caller distinguish a
    /// malformed header from an unknown or revoked token. The distinction
    /// lives in server-side log events at the rejection sites.
    #[error("Invalid or missing credentials")]
    Unauthenticated,

    /// Request body failed parsing or validation.
    ///
    /// Returns HTTP 400 Bad Request with the carried message, which names
    /// the first violated rule.
    #[error("Invalid request")]
    InvalidRequest(String),

    /// Route exists but not for this HTTP method.
    ///
    /// Returns HTTP 405 Method Not Allowed.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Unexpected server fault outside the database layer.
    ///
    /// Returns HTTP 500 with the same generic message as `Database`.
    #[error("An internal error occurred")]
    Internal,
}

/// Render the error as an HTTP response.
///
/// Handlers return `Result<T, AppError>` and axum calls this for the `Err`
/// side. Every error body has the same shape:
///
/// ```json
/// { "error": "what went wrong" }
/// ```
///
/// Status codes: 401 `Unauthenticated`, 400 `InvalidRequest`,
/// 405 `MethodNotAllowed`, 500 `Database` and `Internal`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unauthenticated => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, self.to_string()),
            AppError::Database(e) => {
                error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred".to_string(),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

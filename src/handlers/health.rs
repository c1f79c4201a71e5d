//! Liveness endpoint for deploy checks and uptime monitors.

use crate::{error::AppError, state::AppState};
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Body returned by `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,

    /// Backing store reachability, probed per request
    pub database: String,

    pub timestamp: DateTime<Utc>,
}

/// Report service and store health.
///
/// # Endpoint
///
/// `GET /health` (no authentication)
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "status": "healthy",
///   "database": "connected",
///   "timestamp": "2026-08-22T16:00:00Z"
/// }
/// ```
///
/// An unreachable store surfaces as the standard 500 error body instead.
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, AppError> {
    state.feedback.ping().await?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        database: "connected".to_string(),
        timestamp: Utc::now(),
    }))
}

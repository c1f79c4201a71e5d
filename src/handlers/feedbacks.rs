//! Feedback ingestion HTTP handlers.
//!
//! This module implements the public ingestion endpoint:
//! - POST /feedbacks - Submit one feedback record

use crate::{
    error::AppError,
    middleware::auth::AuthContext,
    models::feedback::{SubmitFeedbackRequest, SubmitFeedbackResponse},
    services::feedback_service,
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

/// Submit feedback.
///
/// # Endpoint
///
/// `POST /feedbacks`
///
/// # Authentication
///
/// Requires an active API key in the Authorization header:
/// `Authorization: Bearer <token>`. The tenant and key recorded on the
/// feedback row come from that credential, never from the body.
///
/// # Request Body
///
/// ```json
/// {
///   "userId": "user-482",
///   "type": "bug",
///   "message": "Export button does nothing on Safari",
///   "metadata": { "version": "2.4.1", "platform": "macos" }
/// }
/// ```
///
/// `userId` and `metadata` are optional.
///
/// # Response (201 Created)
///
/// ```json
/// {
///   "success": true,
///   "feedback": {
///     "id": "770e8400-e29b-41d4-a716-446655440002",
///     "type": "bug",
///     "message": "Export button does nothing on Safari",
///     "created_at": "2026-08-22T16:00:00Z"
///   }
/// }
/// ```
///
/// # Errors
///
/// - **401**: missing, malformed, or unknown credential
/// - **400**: body is not valid JSON, or a field violates a validation rule
/// - **500**: the record could not be stored
///
/// Submissions are not idempotent: retrying a successful request stores a
/// second record. Deduplication is the caller's concern.
pub async fn submit_feedback(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    payload: Result<Json<SubmitFeedbackRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitFeedbackResponse>), AppError> {
    // Malformed JSON arrives as a rejection; convert it to the standard
    // 400 error shape
    let Json(request) =
        payload.map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))?;

    let feedback = feedback_service::submit(state.feedback.as_ref(), &auth, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitFeedbackResponse {
            success: true,
            feedback: feedback.into(),
        }),
    ))
}

/// Fallback for `/feedbacks` requests using an unsupported method.
///
/// Registered on the route itself, under the CORS layer but outside any
/// credential check: a GET or PUT gets 405 whether or not it carries a key.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

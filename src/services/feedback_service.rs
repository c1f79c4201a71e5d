//! Feedback service - validation and persistence for submissions.
//!
//! Validation runs in a fixed order, so a payload with several problems
//! always reports the same (first) one:
//! 1. `type` and `message` present
//! 2. `type` within the accepted set (case-sensitive)
//! 3. `message` non-empty after trimming
//! 4. trimmed `message` at most 5000 characters
//! 5. `metadata` values are scalars (flat object)
//!
//! Persistence happens only after every rule passes; a rejected request
//! writes nothing.

use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::feedback::{Feedback, FeedbackType, NewFeedback, SubmitFeedbackRequest};
use crate::store::FeedbackStore;
use serde_json::{Map, Value};

/// Maximum accepted message length, in characters, after trimming.
const MAX_MESSAGE_CHARS: usize = 5000;

/// Validate a submission and write it to the store.
///
/// The tenant and key stamped onto the record come from `auth` (the resolved
/// credential), never from the request body.
pub async fn submit(
    store: &dyn FeedbackStore,
    auth: &AuthContext,
    request: SubmitFeedbackRequest,
) -> Result<Feedback, AppError> {
    let submission = validate(request)?;

    let new_feedback = NewFeedback {
        tenant_id: auth.tenant_id.clone(),
        api_key_id: auth.api_key_id,
        feedback_type: submission.feedback_type,
        message: submission.message,
        external_user_id: submission.external_user_id,
        metadata: submission.metadata,
    };

    store.insert(&new_feedback).await
}

/// A submission that passed every validation rule.
#[derive(Debug)]
struct ValidSubmission {
    feedback_type: FeedbackType,
    message: String,
    external_user_id: Option<String>,
    metadata: Value,
}

/// Apply the validation rules in order; the first failure wins.
fn validate(request: SubmitFeedbackRequest) -> Result<ValidSubmission, AppError> {
    // Presence first: a payload missing either field reports both
    let (Some(raw_type), Some(raw_message)) = (
        request.feedback_type.as_deref(),
        request.message.as_deref(),
    ) else {
        return Err(AppError::InvalidRequest(
            "`type` and `message` are required".to_string(),
        ));
    };

    // Type must match the accepted set exactly (no case folding)
    let feedback_type = FeedbackType::parse(raw_type).ok_or_else(|| {
        AppError::InvalidRequest(
            "`type` must be one of: bug, suggestion, praise, other".to_string(),
        )
    })?;

    // The message is stored trimmed; one that is all whitespace is empty
    let message = raw_message.trim();
    if message.is_empty() {
        return Err(AppError::InvalidRequest(
            "`message` must not be empty".to_string(),
        ));
    }

    // Length counts characters, not bytes
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(AppError::InvalidRequest(format!(
            "`message` must be at most {MAX_MESSAGE_CHARS} characters"
        )));
    }

    let metadata = validate_metadata(request.metadata)?;

    Ok(ValidSubmission {
        feedback_type,
        message: message.to_string(),
        external_user_id: request.user_id,
        metadata,
    })
}

/// Check the caller-supplied metadata object and convert it for storage.
///
/// Values must be scalars (string, number, boolean, or null); nested objects
/// and arrays are rejected. Absent metadata is stored as `{}`.
fn validate_metadata(metadata: Option<Map<String, Value>>) -> Result<Value, AppError> {
    let Some(map) = metadata else {
        return Ok(Value::Object(Map::new()));
    };

    for (key, value) in &map {
        if value.is_object() || value.is_array() {
            return Err(AppError::InvalidRequest(format!(
                "`metadata` must be a flat object; `{key}` holds a nested value"
            )));
        }
    }

    Ok(Value::Object(map))
}

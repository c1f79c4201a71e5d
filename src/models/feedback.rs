//! Feedback data models and API request/response types.
//!
//! This module defines:
//! - `Feedback`: Database entity representing one submitted feedback record
//! - `FeedbackType`: The closed set of accepted feedback categories
//! - `SubmitFeedbackRequest`: Request body accepted by the ingestion endpoint
//! - `SubmitFeedbackResponse`: Receipt returned to clients on success

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of a feedback submission.
///
/// Matching is case-sensitive: clients must send exactly `bug`,
/// `suggestion`, `praise`, or `other`. Maps to the `feedback_type` enum type
/// in PostgreSQL, which uses the same lowercase spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "feedback_type", rename_all = "lowercase")]
pub enum FeedbackType {
    Bug,
    Suggestion,
    Praise,
    Other,
}

impl FeedbackType {
    /// Parse a client-supplied type string.
    ///
    /// Returns `None` for anything outside the accepted set, including
    /// case variants like `"Bug"`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "bug" => Some(Self::Bug),
            "suggestion" => Some(Self::Suggestion),
            "praise" => Some(Self::Praise),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Represents a feedback record from the database.
///
/// # Database Table
///
/// Maps to the `feedback` table. Each record:
/// - Belongs to exactly one tenant and one API key (the key the submitter
///   authenticated with; the tenant is that key's owner)
/// - Stores the message already trimmed of surrounding whitespace
/// - Carries caller-supplied metadata as a flat JSON object (`{}` if the
///   caller sent none)
/// - Is immutable once written; there is no update or delete endpoint
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Feedback {
    /// Unique identifier for this feedback record
    pub id: Uuid,

    /// Tenant the feedback belongs to (taken from the resolved credential)
    pub tenant_id: String,

    /// API key the submitter authenticated with
    pub api_key_id: Uuid,

    /// Feedback category
    pub feedback_type: FeedbackType,

    /// Feedback text, trimmed, 1 to 5000 characters
    pub message: String,

    /// Identifier of the end user within the submitting application
    ///
    /// Free-form and never validated: this is whatever the third-party app
    /// uses to name its own users, not an identity in this system.
    pub external_user_id: Option<String>,

    /// Flat key/value context supplied by the caller (JSON object)
    ///
    /// Opaque to the server. Stored and returned exactly as submitted.
    pub metadata: serde_json::Value,

    /// Server-assigned submission timestamp
    pub created_at: DateTime<Utc>,
}

/// Parameters for inserting a new feedback record.
///
/// Built by the feedback service after validation; the tenant and key IDs
/// always come from the authenticated credential, never from the body.
#[derive(Debug)]
pub struct NewFeedback {
    pub tenant_id: String,
    pub api_key_id: Uuid,
    pub feedback_type: FeedbackType,
    pub message: String,
    pub external_user_id: Option<String>,
    pub metadata: serde_json::Value,
}

/// Request body for `POST /feedbacks`.
///
/// # JSON Example
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
/// `type` and `message` are required; the rest is optional. Requiredness is
/// checked by the feedback service rather than serde so that a missing field
/// produces the documented validation message instead of a parser error.
#[derive(Debug, Deserialize)]
pub struct SubmitFeedbackRequest {
    /// End-user identifier within the caller's own application
    #[serde(rename = "userId")]
    pub user_id: Option<String>,

    /// Feedback category: `bug`, `suggestion`, `praise`, or `other`
    #[serde(rename = "type")]
    pub feedback_type: Option<String>,

    /// Feedback text (non-empty after trimming, at most 5000 characters)
    pub message: Option<String>,

    /// Optional flat object of caller-defined context values
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Receipt for a stored feedback record.
///
/// Omits the tenant ID, key ID, metadata, and external user ID; submitting
/// clients only get confirmation and the record identity.
#[derive(Debug, Serialize)]
pub struct FeedbackReceipt {
    pub id: Uuid,

    #[serde(rename = "type")]
    pub feedback_type: FeedbackType,

    /// The stored (trimmed) message
    pub message: String,

    pub created_at: DateTime<Utc>,
}

impl From<Feedback> for FeedbackReceipt {
    fn from(feedback: Feedback) -> Self {
        Self {
            id: feedback.id,
            feedback_type: feedback.feedback_type,
            message: feedback.message,
            created_at: feedback.created_at,
        }
    }
}

/// Response returned for a successful submission.
///
/// # JSON Example
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
#[derive(Debug, Serialize)]
pub struct SubmitFeedbackResponse {
    pub success: bool,
    pub feedback: FeedbackReceipt,
}

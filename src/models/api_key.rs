//! API key model for ingestion authentication.
//!
//! API keys are the credentials third-party applications present when
//! submitting feedback. Each key belongs to exactly one tenant and carries an
//! active flag so access can be revoked without deleting the record.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Represents an API key record from the database.
///
/// # Database Table
///
/// Maps to the `api_keys` table with columns:
/// - `id`: Unique identifier (UUID)
/// - `tenant_id`: Tenant this key belongs to
/// - `token`: The secret bearer token (64 hex characters)
/// - `label`: Human-readable name for the key
/// - `is_active`: Whether the key currently authenticates requests
/// - `created_at`: When the key was created
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ApiKey {
    /// Unique identifier for this API key
    pub id: Uuid,

    /// Tenant that owns this key
    pub tenant_id: String,

    /// Secret bearer token (32 random bytes, hex encoded)
    ///
    /// Stored verbatim: authentication is an exact-match lookup on this
    /// column, and the dashboard displays the current token to the tenant.
    /// Log output must never contain it; see the fingerprint helper in the
    /// auth middleware.
    pub token: String,

    /// Human-readable name of the key (e.g. "default", "production")
    pub label: String,

    /// Whether this API key is currently active
    ///
    /// Inactive keys are rejected during authentication. Regenerating a key
    /// deactivates the previous one instead of deleting it, so feedback
    /// recorded under the old key keeps its attribution.
    pub is_active: bool,

    /// Timestamp when this API key was created
    pub created_at: DateTime<Utc>,
}

/// Result of resolving a presented bearer token to its owning credential.
///
/// Carries only what the ingestion path needs to stamp onto a feedback row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ResolvedKey {
    /// Tenant that owns the matched key
    pub tenant_id: String,

    /// ID of the matched key
    pub api_key_id: Uuid,
}

/// API key representation returned to the account dashboard.
///
/// Includes the token itself: this is the one surface where the tenant reads
/// their credential. The owning tenant ID is omitted since the caller is
/// already authenticated as that tenant.
#[derive(Debug, Serialize)]
pub struct ApiKeyResponse {
    pub id: Uuid,
    pub token: String,
    pub label: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ApiKey> for ApiKeyResponse {
    fn from(key: ApiKey) -> Self {
        Self {
            id: key.id,
            token: key.token,
            label: key.label,
            is_active: key.is_active,
            created_at: key.created_at,
        }
    }
}

/// Response for the current-key lookup.
///
/// `key` is `null` when the tenant has no active key yet.
#[derive(Debug, Serialize)]
pub struct CurrentKeyResponse {
    pub key: Option<ApiKeyResponse>,
}

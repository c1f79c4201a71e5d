//! Storage capability traits and their PostgreSQL implementations.
//!
//! Handlers, middleware, and services depend on these traits rather than on
//! a concrete pool. Production wiring plugs in the Postgres implementations
//! from [`postgres`]; the integration tests drive the real router against
//! in-memory implementations instead.

pub mod postgres;

use crate::error::AppError;
use crate::models::api_key::{ApiKey, ResolvedKey};
use crate::models::feedback::{Feedback, NewFeedback};
use crate::models::tenant::Tenant;
use async_trait::async_trait;

/// Credential lookup and rotation for API keys.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Resolve a presented secret token to its owning tenant and key.
    ///
    /// Matches active keys only, by exact string equality. Returns `None`
    /// for unknown or deactivated tokens. No side effects.
    async fn resolve(&self, secret_token: &str) -> Result<Option<ResolvedKey>, AppError>;

    /// The tenant's currently active key, if any.
    ///
    /// Derived from the key rows themselves (most recent active row);
    /// there is no separate pointer to keep in sync.
    async fn current_active_key(&self, tenant_id: &str) -> Result<Option<ApiKey>, AppError>;

    /// Replace the tenant's active key with `new_token`.
    ///
    /// Deactivates the current key (when one exists, carrying its label to
    /// the replacement) and inserts the new row as one atomic unit.
    /// Concurrent calls for the same tenant are serialized; at no point are
    /// two of the tenant's keys active.
    async fn regenerate(&self, tenant_id: &str, new_token: &str) -> Result<ApiKey, AppError>;
}

/// Tenant provisioning and lookup.
#[async_trait]
pub trait TenantStore: Send + Sync {
    /// Fetch the tenant, inserting the row first if this subject has never
    /// been seen. Safe to call concurrently for the same subject.
    async fn ensure(&self, tenant_id: &str, display_name: &str) -> Result<Tenant, AppError>;
}

/// Persistence for submitted feedback.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Insert one feedback record and return it as stored.
    async fn insert(&self, feedback: &NewFeedback) -> Result<Feedback, AppError>;

    /// Cheap connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<(), AppError>;
}

//! Tenant (company account) model.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Represents a tenant record from the database.
///
/// The tenant ID is the subject assigned by the external identity provider.
/// It is stored as opaque text and never parsed or generated by this service.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Tenant {
    /// Identity-provider subject identifying this company
    pub id: String,

    /// Human-readable company name shown in the dashboard
    pub display_name: String,

    /// Timestamp when this tenant was first provisioned
    pub created_at: DateTime<Utc>,
}

//! PostgreSQL-backed storage.
//!
//! This module provides:
//! - Connection pool creation and automatic migrations
//! - Production implementations of the storage traits
//!
//! # Atomicity Guarantees
//!
//! Key regeneration runs inside a PostgreSQL transaction holding a row lock
//! on the tenant, so deactivating the old key and inserting the new one is
//! all-or-nothing even under concurrent regeneration calls. A partial unique
//! index on `api_keys (tenant_id) WHERE is_active` backs the same invariant
//! at the schema level.

use crate::error::AppError;
use crate::models::api_key::{ApiKey, ResolvedKey};
use crate::models::feedback::{Feedback, NewFeedback};
use crate::models::tenant::Tenant;
use crate::store::{CredentialStore, FeedbackStore, TenantStore};
use async_trait::async_trait;
use sqlx::PgPool;

/// Create a new PostgreSQL connection pool.
///
/// A connection pool maintains multiple database connections that can be
/// reused across HTTP requests, which is much more efficient than opening a
/// new connection for each request.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection string is invalid
/// - Cannot connect to PostgreSQL server
/// - Database authentication fails
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        // Limit concurrent connections
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Run database migrations from the `migrations/` directory.
///
/// Migrations are tracked in the `_sqlx_migrations` table, so each migration
/// runs only once.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    // The macro reads migrations at compile time from ./migrations directory
    sqlx::migrate!("./migrations").run(pool).await
}

/// Credential storage backed by the `api_keys` table.
#[derive(Clone)]
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn resolve(&self, secret_token: &str) -> Result<Option<ResolvedKey>, AppError> {
        let resolved = sqlx::query_as::<_, ResolvedKey>(
            "SELECT tenant_id, id AS api_key_id
             FROM api_keys
             WHERE token = $1 AND is_active = true",
        )
        .bind(secret_token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(resolved)
    }

    async fn current_active_key(&self, tenant_id: &str) -> Result<Option<ApiKey>, AppError> {
        let key = sqlx::query_as::<_, ApiKey>(
            "SELECT id, tenant_id, token, label, is_active, created_at
             FROM api_keys
             WHERE tenant_id = $1 AND is_active = true
             ORDER BY created_at DESC
             LIMIT 1",
        )
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(key)
    }

    async fn regenerate(&self, tenant_id: &str, new_token: &str) -> Result<ApiKey, AppError> {
        // Start db transaction
        let mut tx = self.pool.begin().await?;

        // Lock the tenant row. Concurrent regenerations for the same tenant
        // queue on this lock, so the deactivate + insert below never
        // interleave.
        let locked_tenant: Option<String> =
            sqlx::query_scalar("SELECT id FROM tenants WHERE id = $1 FOR UPDATE")
                .bind(tenant_id)
                .fetch_optional(&mut *tx)
                .await?;

        if locked_tenant.is_none() {
            tx.rollback().await?;
            tracing::error!("key regeneration requested for unknown tenant {}", tenant_id);
            return Err(AppError::Internal);
        }

        // Deactivate the current key, keeping its label for the replacement.
        // The previous row stays in place so existing feedback keeps its
        // attribution.
        let previous_label: Option<String> = sqlx::query_scalar(
            "UPDATE api_keys
             SET is_active = false
             WHERE tenant_id = $1 AND is_active = true
             RETURNING label",
        )
        .bind(tenant_id)
        .fetch_optional(&mut *tx)
        .await?;

        let label = previous_label.unwrap_or_else(|| "default".to_string());

        // Insert the replacement key
        let key = sqlx::query_as::<_, ApiKey>(
            r#"
            INSERT INTO api_keys (tenant_id, token, label)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(new_token)
        .bind(&label)
        .fetch_one(&mut *tx)
        .await?;

        // Commit all changes atomically
        tx.commit().await?;

        Ok(key)
    }
}

/// Tenant storage backed by the `tenants` table.
#[derive(Clone)]
pub struct PostgresTenantStore {
    pool: PgPool,
}

impl PostgresTenantStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantStore for PostgresTenantStore {
    async fn ensure(&self, tenant_id: &str, display_name: &str) -> Result<Tenant, AppError> {
        // Insert if this subject was never seen; an existing row is left
        // untouched and re-read below
        let inserted = sqlx::query_as::<_, Tenant>(
            r#"
            INSERT INTO tenants (id, display_name)
            VALUES ($1, $2)
            ON CONFLICT (id) DO NOTHING
            RETURNING id, display_name, created_at
            "#,
        )
        .bind(tenant_id)
        .bind(display_name)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(tenant) = inserted {
            return Ok(tenant);
        }

        let tenant = sqlx::query_as::<_, Tenant>(
            "SELECT id, display_name, created_at FROM tenants WHERE id = $1",
        )
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(tenant)
    }
}

/// Feedback storage backed by the `feedback` table.
#[derive(Clone)]
pub struct PostgresFeedbackStore {
    pool: PgPool,
}

impl PostgresFeedbackStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackStore for PostgresFeedbackStore {
    async fn insert(&self, feedback: &NewFeedback) -> Result<Feedback, AppError> {
        // Single-statement insert: a failed submission leaves no partial row
        let record = sqlx::query_as::<_, Feedback>(
            r#"
            INSERT INTO feedback (
                tenant_id,
                api_key_id,
                feedback_type,
                message,
                external_user_id,
                metadata
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&feedback.tenant_id)
        .bind(feedback.api_key_id)
        .bind(feedback.feedback_type)
        .bind(&feedback.message)
        .bind(&feedback.external_user_id)
        .bind(&feedback.metadata)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

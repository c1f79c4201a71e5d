//! Feedback ingestion service.
//!
//! A REST API that lets companies collect end-user feedback (bug reports,
//! suggestions, praise) from inside their own applications. Submissions
//! authenticate with a per-tenant secret API key; the dashboard routes for
//! managing that key authenticate with access tokens from an external
//! identity provider.
//!
//! # Architecture
//!
//! - **HTTP**: axum, JSON in and out
//! - **Storage**: PostgreSQL through sqlx, behind capability traits
//! - **Ingestion auth**: bearer API key resolved on every request
//! - **Dashboard auth**: identity-provider JWT (HS256) in an extractor
//!
//! # Startup
//!
//! [`run`] loads configuration, connects the database pool, applies
//! migrations, assembles the router, and serves until the process stops.

pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod middleware;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod store;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::identity::JwtIdentityProvider;
use crate::state::AppState;
use crate::store::postgres::{
    PostgresCredentialStore, PostgresFeedbackStore, PostgresTenantStore,
};

/// Start the service and block until shutdown.
pub async fn run() -> anyhow::Result<()> {
    // Log filtering comes from RUST_LOG, with "info" as the fallback
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    let pool = store::postgres::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    store::postgres::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    // All handlers see the stores and the token verifier through AppState
    let state = AppState {
        credentials: Arc::new(PostgresCredentialStore::new(pool.clone())),
        tenants: Arc::new(PostgresTenantStore::new(pool.clone())),
        feedback: Arc::new(PostgresFeedbackStore::new(pool)),
        identity: Arc::new(JwtIdentityProvider::new(
            &config.idp_jwt_secret,
            config.idp_audience.as_deref(),
        )),
    };

    let app = router::create_router(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

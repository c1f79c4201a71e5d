//! HTTP route table and middleware assembly.

use crate::{handlers, middleware, state::AppState};
use axum::{
    Router, middleware as axum_middleware,
    http::{Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the application router.
///
/// # Route Groups
///
/// - `/feedbacks`: public ingestion, authenticated per-request by API key
/// - `/keys/*`: account dashboard routes, authenticated by identity-provider
///   access token inside the handler extractor
/// - `/health`: unauthenticated monitoring probe
pub fn create_router(state: AppState) -> Router {
    // Ingestion endpoint. Layer order matters here: the CORS layer sits
    // outside the auth layer, so browser preflights (OPTIONS) are answered
    // before any credential check. Other non-POST methods pass through auth
    // untouched and land on the 405 fallback.
    let ingest_routes = Router::new()
        .route(
            "/feedbacks",
            post(handlers::feedbacks::submit_feedback)
                .fallback(handlers::feedbacks::method_not_allowed),
        )
        // Apply API key authentication to this group
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_api_key,
        ))
        // Submissions come straight from third-party web apps, so any origin
        // may call this endpoint
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::POST, Method::OPTIONS])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]),
        );

    // Account dashboard routes (identity-provider auth runs in the
    // AuthTenant extractor)
    let account_routes = Router::new()
        .route("/keys/current", get(handlers::keys::current_key))
        .route("/keys/regenerate", post(handlers::keys::regenerate_key));

    Router::new()
        // Public routes (no authentication required)
        .route("/health", get(handlers::health::health_check))
        .merge(ingest_routes)
        .merge(account_routes)
        // Add request tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

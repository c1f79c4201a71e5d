//! API key management HTTP handlers.
//!
//! These endpoints back the account dashboard:
//! - GET /keys/current - The tenant's active key, if any
//! - POST /keys/regenerate - Mint a fresh key, retiring the current one
//!
//! Both authenticate the calling tenant with an identity-provider access
//! token (see [`crate::identity`]), not with an API key.

use crate::{
    error::AppError,
    identity::AuthTenant,
    models::api_key::{ApiKeyResponse, CurrentKeyResponse},
    services::key_service,
    state::AppState,
};
use axum::{Json, extract::State};

/// Fetch the tenant's currently active API key.
///
/// # Endpoint
///
/// `GET /keys/current`
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "key": {
///     "id": "550e8400-e29b-41d4-a716-446655440000",
///     "token": "4f90d13a6b...",
///     "label": "default",
///     "is_active": true,
///     "created_at": "2026-08-22T16:00:00Z"
///   }
/// }
/// ```
///
/// `key` is `null` for tenants that have not generated a key yet. The token
/// is included: this endpoint is how the dashboard shows the tenant their
/// credential.
pub async fn current_key(
    State(state): State<AppState>,
    AuthTenant(tenant): AuthTenant,
) -> Result<Json<CurrentKeyResponse>, AppError> {
    let key = state.credentials.current_active_key(&tenant.id).await?;

    Ok(Json(CurrentKeyResponse {
        key: key.map(ApiKeyResponse::from),
    }))
}

/// Replace the tenant's API key.
///
/// # Endpoint
///
/// `POST /keys/regenerate`
///
/// Deactivates the current key and returns the freshly minted replacement.
/// Clients still sending the old token receive 401 from the moment this
/// call returns; feedback already recorded under the old key keeps its
/// attribution.
pub async fn regenerate_key(
    State(state): State<AppState>,
    AuthTenant(tenant): AuthTenant,
) -> Result<Json<ApiKeyResponse>, AppError> {
    let key = key_service::regenerate(state.credentials.as_ref(), &tenant.id).await?;

    Ok(Json(key.into()))
}

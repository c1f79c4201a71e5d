//! API key check in front of the ingestion endpoint.
//!
//! Every feedback submission passes through here first: the middleware pulls
//! the bearer token out of the Authorization header, resolves it against the
//! credential store, and either attaches the resolved [`AuthContext`] to the
//! request or answers 401 on the spot.

use crate::{error::AppError, state::AppState};
use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Resolved credential for one authenticated submission.
///
/// Lives in the request extensions; the handler reads it back with
/// `Extension<AuthContext>`.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Tenant that owns the presented key
    ///
    /// Stamped onto every feedback row written by this request; the body
    /// has no say in it.
    pub tenant_id: String,

    /// ID of the authenticated API key
    pub api_key_id: Uuid,
}

/// Authenticate a feedback submission by API key.
///
/// Non-POST requests skip the check entirely: they carry no submission, and
/// the route's fallback answers them with 405 whether or not a credential is
/// present. (OPTIONS never reaches this layer; the CORS layer answers it
/// earlier.)
///
/// For POST, the steps below run in order and stop at the first failure. A
/// missing header, a non-Bearer header, and an unknown token all produce the
/// identical 401 response, so callers cannot probe which part of their
/// credential was wrong. The cases stay distinguishable server-side through
/// separate warn events; unknown tokens are logged as a SHA-256 fingerprint
/// prefix, never verbatim.
pub async fn require_api_key(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if request.method() != Method::POST {
        return Ok(next.run(request).await);
    }

    // Step 1: the Authorization header must exist and be readable
    let Some(auth_header) = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
    else {
        tracing::warn!("feedback submission without Authorization header");
        return Err(AppError::Unauthenticated);
    };

    // Step 2: only the "Bearer <token>" scheme is accepted
    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        tracing::warn!("feedback submission with non-Bearer Authorization header");
        return Err(AppError::Unauthenticated);
    };

    // Step 3: exact-match lookup against active keys
    let Some(resolved) = state.credentials.resolve(token).await? else {
        tracing::warn!(
            key_fingerprint = %fingerprint(token),
            "feedback submission with unknown or inactive API key"
        );
        return Err(AppError::Unauthenticated);
    };

    // Step 4: hand the resolved credential to the handler
    let auth_context = AuthContext {
        tenant_id: resolved.tenant_id,
        api_key_id: resolved.api_key_id,
    };
    request.extensions_mut().insert(auth_context);

    Ok(next.run(request).await)
}

/// Short SHA-256 digest of a presented token, safe to write to logs.
fn fingerprint(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());

    let digest = hex::encode(hasher.finalize());
    digest[..12].to_string()
}

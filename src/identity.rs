//! Tenant identity verification for the account routes.
//!
//! Sign-in and sign-up live in an external identity provider; this service
//! only consumes the access tokens that provider issues. [`IdentityProvider`]
//! is the seam: anything that can turn a bearer credential into a tenant
//! identity can be wired in. The shipped implementation verifies HS256 JWTs
//! against a shared secret.

use crate::error::AppError;
use crate::models::tenant::Tenant;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;

/// A verified identity-provider assertion about the calling tenant.
#[derive(Debug, Clone)]
pub struct TenantIdentity {
    /// Provider subject; used verbatim as the tenant ID
    pub tenant_id: String,

    /// Display name claimed by the provider, when it sends one
    pub display_name: Option<String>,
}

/// Verifies dashboard credentials issued by the external identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify a bearer credential and return the tenant it identifies.
    async fn authenticate(&self, credential: &str) -> Result<TenantIdentity, AppError>;
}

/// Claims read from identity-provider access tokens.
///
/// `exp` is enforced by the validation settings and does not need a field
/// here. The display name falls back from `name` to `email`.
#[derive(Debug, Deserialize)]
struct IdpClaims {
    sub: String,
    name: Option<String>,
    email: Option<String>,
}

/// HS256 token verifier for providers that share a signing secret.
pub struct JwtIdentityProvider {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityProvider {
    /// Build a verifier for tokens signed with `secret`.
    ///
    /// When `audience` is given, tokens must carry a matching `aud` claim.
    /// When it is `None`, the audience claim is ignored entirely (tokens
    /// with or without one verify the same).
    pub fn new(secret: &str, audience: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        match audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn authenticate(&self, credential: &str) -> Result<TenantIdentity, AppError> {
        let token_data =
            jsonwebtoken::decode::<IdpClaims>(credential, &self.decoding_key, &self.validation)
                .map_err(|e| {
                    tracing::warn!("rejected identity-provider token: {}", e);
                    AppError::Unauthenticated
                })?;

        let claims = token_data.claims;

        Ok(TenantIdentity {
            tenant_id: claims.sub,
            display_name: claims.name.or(claims.email),
        })
    }
}

/// Extractor authenticating account-route handlers.
///
/// Verifies the `Authorization: Bearer <access token>` header through the
/// identity provider and yields the tenant row. Sign-up happens at the
/// provider, so the first authenticated dashboard request is when this
/// service first sees a new tenant; the row is provisioned right here.
pub struct AuthTenant(pub Tenant);

impl<S> FromRequestParts<S> for AuthTenant
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or(AppError::Unauthenticated)?;

        let credential = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthenticated)?;

        let state = AppState::from_ref(state);
        let identity = state.identity.authenticate(credential).await?;

        // Provision the tenant on first contact
        let display_name = identity
            .display_name
            .unwrap_or_else(|| identity.tenant_id.clone());
        let tenant = state
            .tenants
            .ensure(&identity.tenant_id, &display_name)
            .await?;

        Ok(AuthTenant(tenant))
    }
}

//! API key service - token generation and rotation.

use crate::error::AppError;
use crate::models::api_key::ApiKey;
use crate::store::CredentialStore;

/// Generate a new secret API token.
///
/// # Output
///
/// 64 hex characters (32 bytes of randomness)
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}

/// Mint a fresh key for the tenant, retiring the current one.
///
/// The store performs the swap atomically: the previous key authenticates
/// until the new row is committed, and never afterwards.
pub async fn regenerate(
    credentials: &dyn CredentialStore,
    tenant_id: &str,
) -> Result<ApiKey, AppError> {
    let token = generate_token();
    credentials.regenerate(tenant_id, &token).await
}

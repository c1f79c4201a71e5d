//! Shared application state.

use crate::identity::IdentityProvider;
use crate::store::{CredentialStore, FeedbackStore, TenantStore};
use std::sync::Arc;

/// Dependencies shared by all request handlers.
///
/// Everything sits behind an `Arc`, so cloning the state per request is
/// cheap. Handlers and middleware see only the traits: production wiring
/// plugs in the Postgres stores and the JWT verifier, the test harness
/// plugs in in-memory stand-ins.
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<dyn CredentialStore>,
    pub tenants: Arc<dyn TenantStore>,
    pub feedback: Arc<dyn FeedbackStore>,
    pub identity: Arc<dyn IdentityProvider>,
}

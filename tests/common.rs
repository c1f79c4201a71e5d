use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header};
use serde::Serialize;
use uuid::Uuid;

use feedback_ingest::{
    error::AppError,
    identity::JwtIdentityProvider,
    models::{
        api_key::{ApiKey, ResolvedKey},
        feedback::{Feedback, NewFeedback},
        tenant::Tenant,
    },
    router::create_router,
    state::AppState,
    store::{CredentialStore, FeedbackStore, TenantStore},
};

/// Secret the test identity provider signs tokens with.
#[allow(dead_code)]
pub const IDP_SECRET: &str = "test-idp-secret";

/// In-memory store backing all three persistence traits, so tests can drive
/// the full router without a database and inspect what was written.
#[derive(Default)]
pub struct MemoryStore {
    pub tenants: Mutex<Vec<Tenant>>,
    pub keys: Mutex<Vec<ApiKey>>,
    pub feedback: Mutex<Vec<Feedback>>,
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn resolve(&self, secret_token: &str) -> Result<Option<ResolvedKey>, AppError> {
        let keys = self.keys.lock().unwrap();
        Ok(keys
            .iter()
            .find(|key| key.token == secret_token && key.is_active)
            .map(|key| ResolvedKey {
                tenant_id: key.tenant_id.clone(),
                api_key_id: key.id,
            }))
    }

    async fn current_active_key(&self, tenant_id: &str) -> Result<Option<ApiKey>, AppError> {
        let keys = self.keys.lock().unwrap();
        // Vec order is insertion order, so the last active entry is the newest.
        Ok(keys
            .iter()
            .rev()
            .find(|key| key.tenant_id == tenant_id && key.is_active)
            .cloned())
    }

    async fn regenerate(&self, tenant_id: &str, new_token: &str) -> Result<ApiKey, AppError> {
        {
            let tenants = self.tenants.lock().unwrap();
            if !tenants.iter().any(|tenant| tenant.id == tenant_id) {
                return Err(AppError::Internal);
            }
        }

        let mut keys = self.keys.lock().unwrap();
        let label = keys
            .iter()
            .rev()
            .find(|key| key.tenant_id == tenant_id && key.is_active)
            .map(|key| key.label.clone())
            .unwrap_or_else(|| "default".to_string());

        for key in keys.iter_mut() {
            if key.tenant_id == tenant_id {
                key.is_active = false;
            }
        }

        let key = ApiKey {
            id: Uuid::new_v4(),
            tenant_id: tenant_id.to_string(),
            token: new_token.to_string(),
            label,
            is_active: true,
            created_at: Utc::now(),
        };
        keys.push(key.clone());
        Ok(key)
    }
}

#[async_trait]
impl TenantStore for MemoryStore {
    async fn ensure(&self, tenant_id: &str, display_name: &str) -> Result<Tenant, AppError> {
        let mut tenants = self.tenants.lock().unwrap();
        if let Some(existing) = tenants.iter().find(|tenant| tenant.id == tenant_id) {
            return Ok(existing.clone());
        }
        let tenant = Tenant {
            id: tenant_id.to_string(),
            display_name: display_name.to_string(),
            created_at: Utc::now(),
        };
        tenants.push(tenant.clone());
        Ok(tenant)
    }
}

#[async_trait]
impl FeedbackStore for MemoryStore {
    async fn insert(&self, feedback: &NewFeedback) -> Result<Feedback, AppError> {
        let row = Feedback {
            id: Uuid::new_v4(),
            tenant_id: feedback.tenant_id.clone(),
            api_key_id: feedback.api_key_id,
            feedback_type: feedback.feedback_type,
            message: feedback.message.clone(),
            external_user_id: feedback.external_user_id.clone(),
            metadata: feedback.metadata.clone(),
            created_at: Utc::now(),
        };
        self.feedback.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[derive(Serialize)]
struct TestClaims {
    sub: String,
    exp: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());

        let state = AppState {
            credentials: store.clone(),
            tenants: store.clone(),
            feedback: store.clone(),
            identity: Arc::new(JwtIdentityProvider::new(IDP_SECRET, None)),
        };

        Self {
            router: create_router(state),
            store,
        }
    }

    /// Insert a tenant with an active API key and return the key's token.
    #[allow(dead_code)]
    pub fn seed_key(&self, tenant_id: &str) -> String {
        {
            let mut tenants = self.store.tenants.lock().unwrap();
            if !tenants.iter().any(|tenant| tenant.id == tenant_id) {
                tenants.push(Tenant {
                    id: tenant_id.to_string(),
                    display_name: tenant_id.to_string(),
                    created_at: Utc::now(),
                });
            }
        }

        let token = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        self.store.keys.lock().unwrap().push(ApiKey {
            id: Uuid::new_v4(),
            tenant_id: tenant_id.to_string(),
            token: token.clone(),
            label: "default".to_string(),
            is_active: true,
            created_at: Utc::now(),
        });
        token
    }

    /// Identity-provider token for `tenant_id`, signed with the test secret.
    #[allow(dead_code)]
    pub fn idp_token(&self, tenant_id: &str) -> String {
        self.idp_token_with(tenant_id, Some("Acme Corp"), IDP_SECRET, 3600)
    }

    /// Identity-provider token with full control over name, secret and
    /// lifetime. A negative lifetime produces an already-expired token.
    #[allow(dead_code)]
    pub fn idp_token_with(
        &self,
        tenant_id: &str,
        name: Option<&str>,
        secret: &str,
        lifetime_secs: i64,
    ) -> String {
        let claims = TestClaims {
            sub: tenant_id.to_string(),
            exp: (Utc::now().timestamp() + lifetime_secs) as usize,
            name: name.map(str::to_string),
        };
        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }
}

// Collaborator traits for the users domain
//
// Naming convention: Base* for trait names (e.g., BaseIdentityProvider)

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domains::users::models::{FieldError, PermissionUpdateRequest};

// =============================================================================
// Identity Provider Trait (Infrastructure - hosted accounts)
// =============================================================================

/// Account as stored by the identity provider
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentityRecord {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub custom_claims: Map<String, Value>,
}

impl IdentityRecord {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            ..Default::default()
        }
    }

    pub fn with_claims(mut self, custom_claims: Map<String, Value>) -> Self {
        self.custom_claims = custom_claims;
        self
    }
}

/// One page of accounts. `next_page_token` is `None` on the last page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPage {
    pub records: Vec<IdentityRecord>,
    pub next_page_token: Option<String>,
}

/// Opaque identity provider failure
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ProviderError(#[from] anyhow::Error);

#[async_trait]
pub trait BaseIdentityProvider: Send + Sync {
    /// Fetch one page of accounts, continuing from `page_token`
    async fn list_users(
        &self,
        page_size: Option<u32>,
        page_token: Option<String>,
    ) -> Result<UserPage, ProviderError>;

    async fn get_user(&self, uid: &str) -> Result<IdentityRecord, ProviderError>;

    /// Replace the account's custom claims with `claims`
    async fn set_custom_claims(
        &self,
        uid: &str,
        claims: Map<String, Value>,
    ) -> Result<(), ProviderError>;
}

// =============================================================================
// Schema Validator Trait
// =============================================================================

pub trait BaseSchemaValidator: Send + Sync {
    /// Either the whole body is valid, or every field error is returned
    fn validate(&self, raw: &Value) -> Result<PermissionUpdateRequest, Vec<FieldError>>;
}

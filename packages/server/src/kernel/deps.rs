use async_trait::async_trait;
use identity_toolkit::{models::UserInfo, IdentityToolkitService};
use serde_json::{Map, Value};
use std::sync::Arc;

use super::{BaseIdentityProvider, BaseSchemaValidator, IdentityRecord, ProviderError, UserPage};
use crate::domains::users::PermissionUpdateSchema;

// =============================================================================
// Identity Toolkit Adapter
// =============================================================================

pub struct IdentityToolkitAdapter(pub Arc<IdentityToolkitService>);

impl IdentityToolkitAdapter {
    pub fn new(service: Arc<IdentityToolkitService>) -> Self {
        Self(service)
    }
}

fn into_record(user: UserInfo) -> Result<IdentityRecord, ProviderError> {
    let custom_claims = user
        .custom_claims()
        .map_err(|e| anyhow::anyhow!("Invalid custom claims for {}: {}", user.local_id, e))?;
    Ok(IdentityRecord {
        uid: user.local_id,
        email: user.email,
        display_name: user.display_name,
        custom_claims,
    })
}

#[async_trait]
impl BaseIdentityProvider for IdentityToolkitAdapter {
    async fn list_users(
        &self,
        page_size: Option<u32>,
        page_token: Option<String>,
    ) -> Result<UserPage, ProviderError> {
        let page = self
            .0
            .list_accounts(page_size, page_token.as_deref())
            .await
            .map_err(anyhow::Error::from)?;

        let records = page
            .users
            .into_iter()
            .map(into_record)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(UserPage {
            records,
            next_page_token: page.next_page_token,
        })
    }

    async fn get_user(&self, uid: &str) -> Result<IdentityRecord, ProviderError> {
        let user = self
            .0
            .lookup_account(uid)
            .await
            .map_err(anyhow::Error::from)?;
        into_record(user)
    }

    async fn set_custom_claims(
        &self,
        uid: &str,
        claims: Map<String, Value>,
    ) -> Result<(), ProviderError> {
        self.0
            .set_custom_attributes(uid, &claims)
            .await
            .map_err(anyhow::Error::from)?;
        Ok(())
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Collaborators shared by every request (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub identity: Arc<dyn BaseIdentityProvider>,
    pub validator: Arc<dyn BaseSchemaValidator>,
    /// Page size requested from the provider while listing users
    pub list_users_page_size: Option<u32>,
}

impl ServerDeps {
    pub fn new(identity: Arc<dyn BaseIdentityProvider>, list_users_page_size: Option<u32>) -> Self {
        Self {
            identity,
            validator: Arc::new(PermissionUpdateSchema),
            list_users_page_size,
        }
    }

    pub fn with_validator(mut self, validator: Arc<dyn BaseSchemaValidator>) -> Self {
        self.validator = validator;
        self
    }
}

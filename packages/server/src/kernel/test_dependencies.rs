// TestDependencies - mock implementations for testing
//
// Provides mock collaborators that can be injected into ServerDeps for tests.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex};

use super::{BaseIdentityProvider, IdentityRecord, ProviderError, ServerDeps, UserPage};

// =============================================================================
// Mock Identity Provider
// =============================================================================

/// Arguments captured from a list_users call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCallArgs {
    pub page_size: Option<u32>,
    pub page_token: Option<String>,
}

/// In-memory identity store.
///
/// Pages are served in insertion order, `page_size` records at a time,
/// regardless of the size the caller asks for. `set_custom_claims` replaces
/// the stored claims wholesale, like the hosted provider.
pub struct MockIdentityProvider {
    users: Arc<Mutex<Vec<IdentityRecord>>>,
    page_size: usize,
    fail_with: Option<String>,
    list_calls: Arc<Mutex<Vec<ListCallArgs>>>,
    get_calls: Arc<Mutex<Vec<String>>>,
    set_claims_calls: Arc<Mutex<Vec<(String, Map<String, Value>)>>>,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(Vec::new())),
            page_size: 1000,
            fail_with: None,
            list_calls: Arc::new(Mutex::new(Vec::new())),
            get_calls: Arc::new(Mutex::new(Vec::new())),
            set_claims_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_user(self, record: IdentityRecord) -> Self {
        self.users.lock().unwrap().push(record);
        self
    }

    pub fn with_users(self, records: impl IntoIterator<Item = IdentityRecord>) -> Self {
        self.users.lock().unwrap().extend(records);
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Make every call fail with `message`
    pub fn failing(mut self, message: &str) -> Self {
        self.fail_with = Some(message.to_string());
        self
    }

    pub fn list_calls(&self) -> Vec<ListCallArgs> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.get_calls.lock().unwrap().clone()
    }

    pub fn set_claims_calls(&self) -> Vec<(String, Map<String, Value>)> {
        self.set_claims_calls.lock().unwrap().clone()
    }

    /// Current stored claims for `uid`
    pub fn claims_of(&self, uid: &str) -> Option<Map<String, Value>> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|record| record.uid == uid)
            .map(|record| record.custom_claims.clone())
    }

    fn check_failure(&self) -> Result<(), ProviderError> {
        match &self.fail_with {
            Some(message) => Err(anyhow::anyhow!("{}", message).into()),
            None => Ok(()),
        }
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseIdentityProvider for MockIdentityProvider {
    async fn list_users(
        &self,
        page_size: Option<u32>,
        page_token: Option<String>,
    ) -> Result<UserPage, ProviderError> {
        self.list_calls.lock().unwrap().push(ListCallArgs {
            page_size,
            page_token: page_token.clone(),
        });
        self.check_failure()?;

        let start = match page_token.as_deref() {
            None => 0,
            Some(token) => token
                .strip_prefix("offset-")
                .and_then(|offset| offset.parse::<usize>().ok())
                .ok_or_else(|| anyhow::anyhow!("Invalid page token: {}", token))?,
        };

        let users = self.users.lock().unwrap();
        let end = (start + self.page_size).min(users.len());
        let records = users.get(start..end).unwrap_or_default().to_vec();
        let next_page_token = (end < users.len()).then(|| format!("offset-{}", end));

        Ok(UserPage {
            records,
            next_page_token,
        })
    }

    async fn get_user(&self, uid: &str) -> Result<IdentityRecord, ProviderError> {
        self.get_calls.lock().unwrap().push(uid.to_string());
        self.check_failure()?;

        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|record| record.uid == uid)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("User not found: {}", uid).into())
    }

    async fn set_custom_claims(
        &self,
        uid: &str,
        claims: Map<String, Value>,
    ) -> Result<(), ProviderError> {
        self.set_claims_calls
            .lock()
            .unwrap()
            .push((uid.to_string(), claims.clone()));
        self.check_failure()?;

        let mut users = self.users.lock().unwrap();
        let record = users
            .iter_mut()
            .find(|record| record.uid == uid)
            .ok_or_else(|| anyhow::anyhow!("User not found: {}", uid))?;
        record.custom_claims = claims;
        Ok(())
    }
}

// =============================================================================
// Test ServerDeps
// =============================================================================

/// ServerDeps over a shared mock, so tests can inspect the mock afterwards
pub fn test_server_deps(identity: Arc<MockIdentityProvider>, page_size: Option<u32>) -> ServerDeps {
    ServerDeps::new(identity, page_size)
}

// Identity Toolkit v1 admin REST API
// https://cloud.google.com/identity-platform/docs/reference/rest

pub mod models;

use reqwest::{Client, Response};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::models::{
    ApiErrorResponse, BatchGetResponse, LookupRequest, LookupResponse, UpdateRequest, UserInfo,
};

/// Production endpoint. The auth emulator serves the same API under
/// `http://<host>:<port>/identitytoolkit.googleapis.com`.
pub const DEFAULT_BASE_URL: &str = "https://identitytoolkit.googleapis.com";

#[derive(Debug, Clone)]
pub struct IdentityToolkitOptions {
    pub project_id: String,
    /// OAuth2 access token with the identitytoolkit scope
    pub access_token: String,
    pub base_url: String,
}

#[derive(Debug, Error)]
pub enum IdentityToolkitError {
    #[error("Request to identity toolkit failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Identity toolkit returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid custom claims: {0}")]
    InvalidClaims(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IdentityToolkitError>;

#[derive(Debug, Clone)]
pub struct IdentityToolkitService {
    options: IdentityToolkitOptions,
    client: Client,
}

impl IdentityToolkitService {
    pub fn new(options: IdentityToolkitOptions) -> Self {
        Self {
            options,
            client: Client::new(),
        }
    }

    fn endpoint(&self, method: &str) -> String {
        format!(
            "{base}/v1/projects/{project}/accounts:{method}",
            base = self.options.base_url.trim_end_matches('/'),
            project = self.options.project_id,
        )
    }

    /// Fetch one page of accounts.
    pub async fn list_accounts(
        &self,
        max_results: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<BatchGetResponse> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(max) = max_results {
            query.push(("maxResults", max.to_string()));
        }
        if let Some(token) = page_token {
            query.push(("nextPageToken", token.to_string()));
        }

        debug!(?max_results, has_page_token = page_token.is_some(), "accounts:batchGet");

        let response = self
            .client
            .get(self.endpoint("batchGet"))
            .bearer_auth(&self.options.access_token)
            .query(&query)
            .send()
            .await?;

        Ok(ensure_success(response)
            .await?
            .json::<BatchGetResponse>()
            .await?)
    }

    /// Fetch a single account by uid.
    pub async fn lookup_account(&self, uid: &str) -> Result<UserInfo> {
        debug!(uid, "accounts:lookup");

        let response = self
            .client
            .post(self.endpoint("lookup"))
            .bearer_auth(&self.options.access_token)
            .json(&LookupRequest { local_id: [uid] })
            .send()
            .await?;

        let body: LookupResponse = ensure_success(response).await?.json().await?;
        body.users
            .into_iter()
            .find(|user| user.local_id == uid)
            .ok_or_else(|| IdentityToolkitError::UserNotFound(uid.to_string()))
    }

    /// Replace the account's custom claims with `claims`.
    pub async fn set_custom_attributes(&self, uid: &str, claims: &Map<String, Value>) -> Result<()> {
        let custom_attributes = serde_json::to_string(claims)?;
        debug!(uid, claim_count = claims.len(), "accounts:update");

        let response = self
            .client
            .post(self.endpoint("update"))
            .bearer_auth(&self.options.access_token)
            .json(&UpdateRequest {
                local_id: uid,
                custom_attributes,
            })
            .send()
            .await?;

        ensure_success(response).await?;
        Ok(())
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorResponse>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);

    if message.starts_with("USER_NOT_FOUND") {
        return Err(IdentityToolkitError::UserNotFound(message));
    }

    Err(IdentityToolkitError::Api {
        status: status.as_u16(),
        message,
    })
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Account record as returned by `accounts:batchGet` and `accounts:lookup`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub local_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Custom claims, JSON-encoded as a string by the API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_attributes: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

impl UserInfo {
    /// Decode `customAttributes` into a claim map.
    ///
    /// A missing or blank attribute string means the account has no claims.
    pub fn custom_claims(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match self.custom_attributes.as_deref().map(str::trim) {
            None | Some("") => Ok(Map::new()),
            Some(raw) => serde_json::from_str(raw),
        }
    }
}

/// One page of `accounts:batchGet`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchGetResponse {
    #[serde(default)]
    pub users: Vec<UserInfo>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct LookupResponse {
    #[serde(default)]
    pub users: Vec<UserInfo>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LookupRequest<'a> {
    pub local_id: [&'a str; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateRequest<'a> {
    pub local_id: &'a str,
    pub custom_attributes: String,
}

/// Google API error envelope
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
}

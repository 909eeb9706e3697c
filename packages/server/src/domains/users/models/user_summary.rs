use serde::{Deserialize, Serialize};

use super::RoleClaimSet;
use crate::kernel::IdentityRecord;

/// Listing entry for one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(rename = "UID")]
    pub uid: String,
    #[serde(rename = "DisplayName")]
    pub display_name: String,
    #[serde(flatten)]
    pub roles: RoleClaimSet,
}

impl UserSummary {
    /// Display name falls back to the email, then the uid.
    pub fn from_record(record: &IdentityRecord) -> Self {
        let display_name = record
            .display_name
            .as_deref()
            .or(record.email.as_deref())
            .unwrap_or(&record.uid)
            .to_string();

        Self {
            uid: record.uid.clone(),
            display_name,
            roles: RoleClaimSet::from_claims(&record.custom_claims),
        }
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::Domain;
use crate::common::auth::PermissionLevel;

/// Sparse per-domain roles. `None` means the domain is not granted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoleClaimSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<PermissionLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat: Option<PermissionLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<PermissionLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<PermissionLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar: Option<PermissionLevel>,
}

impl RoleClaimSet {
    pub fn get(&self, domain: Domain) -> Option<PermissionLevel> {
        match domain {
            Domain::Equipment => self.equipment,
            Domain::Chat => self.chat,
            Domain::System => self.system,
            Domain::Storage => self.storage,
            Domain::Calendar => self.calendar,
        }
    }

    pub fn set(&mut self, domain: Domain, level: Option<PermissionLevel>) {
        let slot = match domain {
            Domain::Equipment => &mut self.equipment,
            Domain::Chat => &mut self.chat,
            Domain::System => &mut self.system,
            Domain::Storage => &mut self.storage,
            Domain::Calendar => &mut self.calendar,
        };
        *slot = level;
    }

    /// Granted domains, in `Domain::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = (Domain, PermissionLevel)> + '_ {
        Domain::ALL
            .into_iter()
            .filter_map(|domain| self.get(domain).map(|level| (domain, level)))
    }

    /// Project stored custom claims onto the five domains.
    ///
    /// Only values that parse as a level are kept, so falsy values (null,
    /// empty string, `false`, `0`) and unknown strings read as not granted.
    pub fn from_claims(claims: &Map<String, Value>) -> Self {
        let mut roles = Self::default();
        for domain in Domain::ALL {
            let level = std::iter::once(domain.claim_key())
                .chain(domain.legacy_claim_keys().iter().copied())
                .find_map(|key| claims.get(key))
                .and_then(PermissionLevel::from_claim);
            roles.set(domain, level);
        }
        roles
    }
}

/// Requested change to one domain's role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleClaimChange {
    Grant(PermissionLevel),
    /// Sent as an explicit `null`
    Revoke,
}

/// Changes to apply on top of a user's existing claims.
/// Domains without an entry are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleClaimPatch {
    changes: BTreeMap<Domain, RoleClaimChange>,
}

impl RoleClaimPatch {
    pub fn grant(mut self, domain: Domain, level: PermissionLevel) -> Self {
        self.changes.insert(domain, RoleClaimChange::Grant(level));
        self
    }

    pub fn revoke(mut self, domain: Domain) -> Self {
        self.changes.insert(domain, RoleClaimChange::Revoke);
        self
    }

    pub fn get(&self, domain: Domain) -> Option<RoleClaimChange> {
        self.changes.get(&domain).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Merge into an existing claim map. Grants overwrite the domain key,
    /// revokes remove it together with any legacy key for the domain.
    /// All other claims are kept.
    pub fn apply_to(&self, claims: &mut Map<String, Value>) {
        for (domain, change) in &self.changes {
            for legacy in domain.legacy_claim_keys() {
                claims.remove(*legacy);
            }
            match change {
                RoleClaimChange::Grant(level) => {
                    claims.insert(domain.claim_key().to_string(), Value::from(level.as_str()));
                }
                RoleClaimChange::Revoke => {
                    claims.remove(domain.claim_key());
                }
            }
        }
    }
}

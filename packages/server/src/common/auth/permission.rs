use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Permission level within a single domain.
///
/// Ordered `Reader < Writer < Admin`; the derived `Ord` follows the
/// discriminants, which are the level's rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    Reader = 1,
    Writer = 2,
    Admin = 3,
}

impl PermissionLevel {
    pub const ALL: [PermissionLevel; 3] = [Self::Reader, Self::Writer, Self::Admin];

    pub fn rank(self) -> u8 {
        self as u8
    }

    /// True when holding `self` is enough for an operation needing `need`
    pub fn satisfies(self, need: PermissionLevel) -> bool {
        self.rank() >= need.rank()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reader => "reader",
            Self::Writer => "writer",
            Self::Admin => "admin",
        }
    }

    /// Parse a raw claim value. Only the three exact string literals are
    /// levels; null, other JSON types and any other string are not.
    pub fn from_claim(value: &Value) -> Option<Self> {
        value.as_str().and_then(|s| s.parse().ok())
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown permission level '{0}', expected reader, writer or admin")]
pub struct InvalidPermissionLevel(pub String);

impl FromStr for PermissionLevel {
    type Err = InvalidPermissionLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reader" => Ok(Self::Reader),
            "writer" => Ok(Self::Writer),
            "admin" => Ok(Self::Admin),
            other => Err(InvalidPermissionLevel(other.to_string())),
        }
    }
}

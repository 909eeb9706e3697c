use serde::{Deserialize, Serialize};
use std::fmt;

/// Independent permission axis. Each domain carries its own role claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Domain {
    Equipment,
    Chat,
    System,
    Storage,
    Calendar,
}

impl Domain {
    pub const ALL: [Domain; 5] = [
        Self::Equipment,
        Self::Chat,
        Self::System,
        Self::Storage,
        Self::Calendar,
    ];

    /// Field name in update requests and user summaries
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Equipment => "Equipment",
            Self::Chat => "Chat",
            Self::System => "System",
            Self::Storage => "Storage",
            Self::Calendar => "Calendar",
        }
    }

    /// Custom claim key, `<Domain>Role`
    pub const fn claim_key(self) -> &'static str {
        match self {
            Self::Equipment => "EquipmentRole",
            Self::Chat => "ChatRole",
            Self::System => "SystemRole",
            Self::Storage => "StorageRole",
            Self::Calendar => "CalendarRole",
        }
    }

    /// Request field names sent by earlier clients, accepted in place of
    /// `field_name`
    pub const fn legacy_field_names(self) -> &'static [&'static str] {
        match self {
            Self::Calendar => &["Calender"],
            _ => &[],
        }
    }

    /// Keys written by earlier deployments, read when `claim_key` is absent
    pub const fn legacy_claim_keys(self) -> &'static [&'static str] {
        match self {
            Self::Calendar => &["CalenderRole"],
            _ => &[],
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

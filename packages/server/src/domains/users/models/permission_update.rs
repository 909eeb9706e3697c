use serde::Serialize;

use super::RoleClaimPatch;

/// Validated body of `UpdateUserPermissions`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionUpdateRequest {
    pub uid: String,
    pub changes: RoleClaimPatch,
}

/// One problem found while validating a request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Location of the offending value; empty for the body itself
    pub path: Vec<String>,
    pub code: String,
    pub message: String,
}

impl FieldError {
    pub const INVALID_TYPE: &'static str = "invalid_type";
    pub const REQUIRED: &'static str = "required";
    pub const INVALID_ENUM_VALUE: &'static str = "invalid_enum_value";
    pub const TOO_SMALL: &'static str = "too_small";
    pub const CONFLICT: &'static str = "conflict";

    pub fn new(path: &[&str], code: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.iter().map(|segment| segment.to_string()).collect(),
            code: code.to_string(),
            message: message.into(),
        }
    }
}

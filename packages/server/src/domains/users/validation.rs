//! Schema for the `UpdateUserPermissions` body
//!
//! ```text
//! {
//!   "UID": string (non-empty),
//!   "Equipment" | "Chat" | "System" | "Storage" | "Calendar":
//!       "reader" | "writer" | "admin" | null   (each optional)
//! }
//! ```
//!
//! `Calender` is accepted for `Calendar`; sending both is an error. Unknown
//! keys are ignored. Every problem is reported, not just the first.

use serde_json::Value;

use super::models::{Domain, FieldError, PermissionUpdateRequest, RoleClaimPatch};
use crate::common::auth::PermissionLevel;
use crate::kernel::BaseSchemaValidator;

const UID_FIELD: &str = "UID";

#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionUpdateSchema;

impl BaseSchemaValidator for PermissionUpdateSchema {
    fn validate(&self, raw: &Value) -> Result<PermissionUpdateRequest, Vec<FieldError>> {
        let Some(object) = raw.as_object() else {
            return Err(vec![FieldError::new(
                &[],
                FieldError::INVALID_TYPE,
                format!("Expected object, received {}", type_name(raw)),
            )]);
        };

        let mut errors = Vec::new();

        let uid = match object.get(UID_FIELD) {
            None => {
                errors.push(FieldError::new(&[UID_FIELD], FieldError::REQUIRED, "Required"));
                None
            }
            Some(Value::String(uid)) if uid.is_empty() => {
                errors.push(FieldError::new(
                    &[UID_FIELD],
                    FieldError::TOO_SMALL,
                    "String must contain at least 1 character(s)",
                ));
                None
            }
            Some(Value::String(uid)) => Some(uid.clone()),
            Some(other) => {
                errors.push(FieldError::new(
                    &[UID_FIELD],
                    FieldError::INVALID_TYPE,
                    format!("Expected string, received {}", type_name(other)),
                ));
                None
            }
        };

        let mut changes = RoleClaimPatch::default();
        for domain in Domain::ALL {
            let mut sent = std::iter::once(domain.field_name())
                .chain(domain.legacy_field_names().iter().copied())
                .filter(|name| object.contains_key(*name));
            let Some(field) = sent.next() else {
                continue;
            };
            if let Some(duplicate) = sent.next() {
                errors.push(FieldError::new(
                    &[duplicate],
                    FieldError::CONFLICT,
                    format!(
                        "'{}' and '{}' set the same role; send only '{}'",
                        field,
                        duplicate,
                        domain.field_name()
                    ),
                ));
                continue;
            }

            match object.get(field) {
                None => {}
                Some(Value::Null) => changes = changes.revoke(domain),
                Some(Value::String(raw_level)) => match raw_level.parse::<PermissionLevel>() {
                    Ok(level) => changes = changes.grant(domain, level),
                    Err(_) => errors.push(FieldError::new(
                        &[field],
                        FieldError::INVALID_ENUM_VALUE,
                        format!(
                            "Invalid enum value. Expected 'reader' | 'writer' | 'admin', received '{}'",
                            raw_level
                        ),
                    )),
                },
                Some(other) => errors.push(FieldError::new(
                    &[field],
                    FieldError::INVALID_TYPE,
                    format!(
                        "Expected 'reader' | 'writer' | 'admin' | null, received {}",
                        type_name(other)
                    ),
                )),
            }
        }

        match uid {
            Some(uid) if errors.is_empty() => Ok(PermissionUpdateRequest { uid, changes }),
            _ => Err(errors),
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub mod domain;
pub mod permission_update;
pub mod role_claims;
pub mod user_summary;

pub use domain::Domain;
pub use permission_update::{FieldError, PermissionUpdateRequest};
pub use role_claims::{RoleClaimChange, RoleClaimPatch, RoleClaimSet};
pub use user_summary::UserSummary;

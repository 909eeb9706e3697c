/// Authorization module for role claims
///
/// Every privileged operation starts with a gate check, before reading its
/// payload:
///
/// ```rust,ignore
/// use crate::common::auth::{AuthorizationGate, PermissionLevel};
///
/// const GATE: AuthorizationGate = AuthorizationGate::at_least("SystemRole", PermissionLevel::Admin);
///
/// GATE.check(&auth_context)?;
/// ```
///
/// Roles are independent per domain and ordered `reader < writer < admin`.

mod claims;
mod context;
mod errors;
mod gate;
mod permission;

pub use claims::has_claim;
pub use context::{AppCheckToken, AuthIdentity, AuthenticationContext};
pub use errors::AuthError;
pub use gate::AuthorizationGate;
pub use permission::{InvalidPermissionLevel, PermissionLevel};

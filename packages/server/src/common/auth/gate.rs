use tracing::{debug, warn};

use super::{has_claim, AuthError, AuthenticationContext, PermissionLevel};

/// Guard for a privileged operation.
///
/// Usage:
/// ```
/// use role_claims_core::common::auth::{AuthorizationGate, AuthenticationContext, PermissionLevel};
///
/// const GATE: AuthorizationGate = AuthorizationGate::at_least("SystemRole", PermissionLevel::Reader);
///
/// let context = AuthenticationContext::default();
/// assert!(GATE.check(&context).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationGate {
    claim: &'static str,
    level: PermissionLevel,
}

impl AuthorizationGate {
    /// Require `claim` to hold at least `level`
    pub const fn at_least(claim: &'static str, level: PermissionLevel) -> Self {
        Self { claim, level }
    }

    pub fn claim(&self) -> &'static str {
        self.claim
    }

    pub fn level(&self) -> PermissionLevel {
        self.level
    }

    /// Run the app check, authentication and claim checks in order,
    /// stopping at the first failure.
    pub fn check(&self, context: &AuthenticationContext) -> Result<(), AuthError> {
        if context.app.is_none() {
            warn!(claim = self.claim, "Rejected request without App Check token");
            return Err(AuthError::AppIntegrityMissing);
        }

        let Some(auth) = context.auth.as_ref() else {
            warn!(claim = self.claim, "Rejected unauthenticated request");
            return Err(AuthError::Unauthenticated);
        };

        if !has_claim(context, self.claim, Some(self.level)) {
            warn!(
                uid = %auth.uid,
                claim = self.claim,
                level = %self.level,
                "Rejected request with insufficient permission"
            );
            return Err(AuthError::InsufficientPermission);
        }

        debug!(uid = %auth.uid, claim = self.claim, "Authorization check passed");
        Ok(())
    }
}

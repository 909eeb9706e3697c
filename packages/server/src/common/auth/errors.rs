use thiserror::Error;

/// Authorization gate failures, in the order the checks run
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("App Check token required")]
    AppIntegrityMissing,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Permission level insufficient")]
    InsufficientPermission,
}

impl AuthError {
    /// Stable identifier returned to callers
    pub fn code(&self) -> &'static str {
        match self {
            Self::AppIntegrityMissing => "AppIntegrityMissing",
            Self::Unauthenticated => "Unauthenticated",
            Self::InsufficientPermission => "InsufficientPermission",
        }
    }
}

use thiserror::Error;

use super::models::FieldError;
use crate::common::auth::AuthError;
use crate::kernel::ProviderError;

/// Terminal failures of the user operations
#[derive(Error, Debug)]
pub enum UsersError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Validation failed with {} field error(s)", .0.len())]
    ValidationFailed(Vec<FieldError>),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl UsersError {
    /// Stable identifier returned to callers
    pub fn code(&self) -> &'static str {
        match self {
            Self::Auth(e) => e.code(),
            Self::MalformedRequest(_) => "MalformedRequest",
            Self::ValidationFailed(_) => "ValidationFailed",
            Self::Provider(_) => "ProviderError",
        }
    }
}

//! Callable protocol responses
//!
//! Success: `{"result": ...}`.
//! Failure: `{"error": {"status", "code", "message", "details"?}}` where
//! `code` is the stable identifier clients branch on.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::error;

use crate::common::auth::AuthError;
use crate::domains::users::UsersError;

/// Successful callable result
pub struct CallableResult<T>(pub T);

#[derive(Serialize)]
struct ResultEnvelope<T> {
    result: T,
}

impl<T: Serialize> IntoResponse for CallableResult<T> {
    fn into_response(self) -> Response {
        Json(ResultEnvelope { result: self.0 }).into_response()
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ErrorBody {
    pub status: &'static str,
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

impl UsersError {
    fn status(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Auth(AuthError::AppIntegrityMissing) => {
                (StatusCode::BAD_REQUEST, "FAILED_PRECONDITION")
            }
            Self::Auth(AuthError::Unauthenticated) => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
            Self::Auth(AuthError::InsufficientPermission) => {
                (StatusCode::FORBIDDEN, "PERMISSION_DENIED")
            }
            Self::MalformedRequest(_) | Self::ValidationFailed(_) => {
                (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT")
            }
            Self::Provider(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        }
    }

    /// Body sent to the caller. Provider failures are reduced to a generic
    /// message; the underlying error only goes to the log.
    pub fn to_error_body(&self) -> ErrorBody {
        let (_, status) = self.status();
        let (message, details) = match self {
            Self::ValidationFailed(errors) => (
                self.to_string(),
                Some(json!({ "fieldErrors": errors })),
            ),
            Self::Provider(_) => ("Identity provider request failed".to_string(), None),
            _ => (self.to_string(), None),
        };

        ErrorBody {
            status,
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for UsersError {
    fn into_response(self) -> Response {
        if let Self::Provider(e) = &self {
            error!(error = %e, "Identity provider request failed");
        }

        let (status_code, _) = self.status();
        let body = ErrorEnvelope {
            error: self.to_error_body(),
        };
        (status_code, Json(body)).into_response()
    }
}

use serde_json::{Map, Value};

/// Verified App Check token attached to a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppCheckToken {
    pub app_id: String,
}

/// Verified ID token attached to a request
#[derive(Debug, Clone, PartialEq)]
pub struct AuthIdentity {
    pub uid: String,
    /// Every claim decoded from the token, custom role claims included
    pub token: Map<String, Value>,
}

impl AuthIdentity {
    pub fn new(uid: impl Into<String>, token: Map<String, Value>) -> Self {
        Self {
            uid: uid.into(),
            token,
        }
    }
}

/// Per-request authentication state.
///
/// Built by the auth context middleware and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthenticationContext {
    pub app: Option<AppCheckToken>,
    pub auth: Option<AuthIdentity>,
}

impl AuthenticationContext {
    pub fn new(app: Option<AppCheckToken>, auth: Option<AuthIdentity>) -> Self {
        Self { app, auth }
    }

    pub fn with_app(mut self, app_id: impl Into<String>) -> Self {
        self.app = Some(AppCheckToken {
            app_id: app_id.into(),
        });
        self
    }

    pub fn with_auth(mut self, identity: AuthIdentity) -> Self {
        self.auth = Some(identity);
        self
    }

    pub fn uid(&self) -> Option<&str> {
        self.auth.as_ref().map(|auth| auth.uid.as_str())
    }
}

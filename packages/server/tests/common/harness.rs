// Test harness: router over mock collaborators, driven in-process

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use role_claims_core::kernel::{test_server_deps, MockIdentityProvider};
use role_claims_core::server::{build_app, TokenVerifier, TokenVerifiers};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

pub const PROJECT_ID: &str = "demo-project";
pub const ID_TOKEN_SECRET: &str = "id_token_test_secret";
pub const APP_CHECK_SECRET: &str = "app_check_test_secret";
pub const PAGE_SIZE: u32 = 50;

fn id_token_issuer() -> String {
    format!("https://securetoken.google.com/{}", PROJECT_ID)
}

/// Who is calling: App Check presence plus an optional signed-in identity
#[derive(Debug, Clone, Default)]
pub struct Caller {
    app_check: bool,
    identity: Option<(String, Value)>,
    raw_id_token: Option<String>,
}

impl Caller {
    /// No App Check token, not signed in
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// App Check token, not signed in
    pub fn app_only() -> Self {
        Self {
            app_check: true,
            ..Self::default()
        }
    }

    /// App Check token and an ID token carrying `claims`
    pub fn signed_in(uid: &str, claims: Value) -> Self {
        Self {
            app_check: true,
            identity: Some((uid.to_string(), claims)),
            raw_id_token: None,
        }
    }

    pub fn system(level: &str) -> Self {
        Self::signed_in("caller-uid", json!({ "SystemRole": level }))
    }

    pub fn without_app_check(mut self) -> Self {
        self.app_check = false;
        self
    }

    pub fn with_raw_id_token(mut self, token: &str) -> Self {
        self.raw_id_token = Some(token.to_string());
        self
    }

    fn id_token(&self) -> Option<String> {
        if let Some(raw) = &self.raw_id_token {
            return Some(raw.clone());
        }
        let (uid, custom) = self.identity.as_ref()?;
        let mut claims = json!({
            "sub": uid,
            "user_id": uid,
            "iss": id_token_issuer(),
            "aud": PROJECT_ID,
            "exp": chrono::Utc::now().timestamp() + 3600,
            "iat": chrono::Utc::now().timestamp(),
        });
        if let (Some(target), Some(extra)) = (claims.as_object_mut(), custom.as_object()) {
            target.extend(extra.clone());
        }
        Some(sign(ID_TOKEN_SECRET, &claims))
    }

    fn app_check_token(&self) -> Option<String> {
        self.app_check.then(|| {
            sign(
                APP_CHECK_SECRET,
                &json!({
                    "sub": "1:1234567890:web:test",
                    "exp": chrono::Utc::now().timestamp() + 3600,
                }),
            )
        })
    }
}

fn sign(secret: &str, claims: &Value) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to sign test token")
}

/// Response of one callable invocation
#[derive(Debug)]
pub struct CallResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl CallResponse {
    pub fn result(&self) -> &Value {
        &self.body["result"]
    }

    pub fn error_code(&self) -> Option<&str> {
        self.body["error"]["code"].as_str()
    }

    pub fn error_status(&self) -> Option<&str> {
        self.body["error"]["status"].as_str()
    }
}

pub struct TestHarness {
    pub identity: Arc<MockIdentityProvider>,
    router: Router,
}

impl TestHarness {
    pub fn new(identity: MockIdentityProvider) -> Self {
        let identity = Arc::new(identity);
        let verifiers = TokenVerifiers {
            id_token: Arc::new(TokenVerifier::from_secret(
                ID_TOKEN_SECRET,
                Some(&id_token_issuer()),
                Some(PROJECT_ID),
            )),
            app_check: Arc::new(TokenVerifier::from_secret(APP_CHECK_SECRET, None, None)),
        };
        let router = build_app(
            test_server_deps(identity.clone(), Some(PAGE_SIZE)),
            verifiers,
            Vec::new(),
        );
        Self { identity, router }
    }

    pub fn empty() -> Self {
        Self::new(MockIdentityProvider::new())
    }

    /// Invoke a callable with `{"data": data}`
    pub async fn call(&self, function: &str, caller: &Caller, data: Value) -> CallResponse {
        let body = serde_json::to_vec(&json!({ "data": data })).expect("Failed to encode body");
        self.call_raw(function, caller, body).await
    }

    /// Invoke a callable with an arbitrary body
    pub async fn call_raw(&self, function: &str, caller: &Caller, body: Vec<u8>) -> CallResponse {
        let mut request = Request::builder()
            .method("POST")
            .uri(format!("/{}", function))
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = caller.id_token() {
            request = request.header("authorization", format!("Bearer {}", token));
        }
        if let Some(token) = caller.app_check_token() {
            request = request.header("x-firebase-appcheck", token);
        }
        let request = request.body(Body::from(body)).expect("Failed to build request");

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> CallResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router should not fail");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        // Non-JSON bodies are kept as text so assertions can report them
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        CallResponse { status, body }
    }
}

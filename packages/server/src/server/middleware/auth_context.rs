use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

use crate::common::auth::{AppCheckToken, AuthIdentity, AuthenticationContext};
use crate::server::token::TokenVerifier;

pub const APP_CHECK_HEADER: &str = "x-firebase-appcheck";

/// Verifiers for the two tokens a callable request may carry
#[derive(Clone)]
pub struct TokenVerifiers {
    pub id_token: Arc<TokenVerifier>,
    pub app_check: Arc<TokenVerifier>,
}

/// Build the AuthenticationContext for a request
///
/// Extracts the App Check token and the ID token, verifies each, and stores
/// the resulting context in request extensions. Missing or invalid tokens
/// leave that part of the context empty; the authorization gate decides
/// what to reject.
pub async fn auth_context_middleware(
    verifiers: TokenVerifiers,
    mut request: Request,
    next: Next,
) -> Response {
    let context = extract_auth_context(request.headers(), &verifiers);

    debug!(
        app_check = context.app.is_some(),
        uid = ?context.uid(),
        "Authentication context extracted"
    );
    request.extensions_mut().insert(context);

    next.run(request).await
}

pub fn extract_auth_context(headers: &HeaderMap, verifiers: &TokenVerifiers) -> AuthenticationContext {
    AuthenticationContext::new(
        extract_app_check(headers, &verifiers.app_check),
        extract_identity(headers, &verifiers.id_token),
    )
}

fn extract_app_check(headers: &HeaderMap, verifier: &TokenVerifier) -> Option<AppCheckToken> {
    let token = headers.get(APP_CHECK_HEADER)?.to_str().ok()?;

    let claims = verifier
        .verify(token)
        .map_err(|e| debug!("Rejected App Check token: {}", e))
        .ok()?;

    // App Check puts the app id in `sub`
    let app_id = claims.get("sub")?.as_str()?.to_string();
    Some(AppCheckToken { app_id })
}

fn extract_identity(headers: &HeaderMap, verifier: &TokenVerifier) -> Option<AuthIdentity> {
    let auth_str = headers.get("authorization")?.to_str().ok()?;

    // Handle both "Bearer <token>" and raw token
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    let claims = verifier
        .verify(token)
        .map_err(|e| debug!("Rejected ID token: {}", e))
        .ok()?;

    let uid = claims
        .get("sub")
        .or_else(|| claims.get("user_id"))?
        .as_str()
        .filter(|uid| !uid.is_empty())?
        .to_string();

    Some(AuthIdentity::new(uid, claims))
}

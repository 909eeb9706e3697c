use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;

use crate::server::TokenVerifier;

/// Key material for verifying one kind of token
///
/// Keys are read once at startup. Picking up rotated provider keys means
/// updating the JWKS variable and restarting.
#[derive(Debug, Clone)]
pub enum TokenKey {
    /// HS256 shared secret
    Secret(String),
    /// Single RS256 public key, PEM encoded; the token's `kid` is not checked
    RsaPem(String),
    /// JWKS document; the token's `kid` selects the key
    Jwks(String),
}

#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub key: TokenKey,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

impl TokenConfig {
    pub fn verifier(&self) -> Result<TokenVerifier> {
        let issuer = self.issuer.as_deref();
        let audience = self.audience.as_deref();
        match &self.key {
            TokenKey::Secret(secret) => Ok(TokenVerifier::from_secret(secret, issuer, audience)),
            TokenKey::RsaPem(pem) => TokenVerifier::from_rsa_pem(pem.as_bytes(), issuer, audience)
                .context("Invalid RSA public key"),
            TokenKey::Jwks(jwks) => {
                TokenVerifier::from_jwks(jwks, issuer, audience).context("Invalid JWKS")
            }
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub identity_project_id: String,
    pub identity_api_base_url: String,
    pub identity_access_token: String,
    pub list_users_page_size: Option<u32>,
    pub id_token: TokenConfig,
    pub app_check: TokenConfig,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let identity_project_id =
            env::var("IDENTITY_PROJECT_ID").context("IDENTITY_PROJECT_ID must be set")?;

        let id_token = TokenConfig {
            key: token_key("ID_TOKEN_SECRET", "ID_TOKEN_PUBLIC_KEY_PEM", "ID_TOKEN_JWKS")?,
            issuer: Some(env::var("ID_TOKEN_ISSUER").unwrap_or_else(|_| {
                format!("https://securetoken.google.com/{}", identity_project_id)
            })),
            audience: Some(
                env::var("ID_TOKEN_AUDIENCE").unwrap_or_else(|_| identity_project_id.clone()),
            ),
        };

        let app_check = TokenConfig {
            key: token_key("APP_CHECK_SECRET", "APP_CHECK_PUBLIC_KEY_PEM", "APP_CHECK_JWKS")?,
            issuer: env::var("APP_CHECK_ISSUER").ok(),
            audience: env::var("APP_CHECK_AUDIENCE").ok(),
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            identity_api_base_url: env::var("IDENTITY_API_BASE_URL")
                .unwrap_or_else(|_| identity_toolkit::DEFAULT_BASE_URL.to_string()),
            identity_access_token: env::var("IDENTITY_ACCESS_TOKEN")
                .context("IDENTITY_ACCESS_TOKEN must be set")?,
            list_users_page_size: Some(
                env::var("LIST_USERS_PAGE_SIZE")
                    .unwrap_or_else(|_| "1000".to_string())
                    .parse()
                    .context("LIST_USERS_PAGE_SIZE must be a valid number")?,
            ),
            allowed_origins: parse_origins(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
            identity_project_id,
            id_token,
            app_check,
        })
    }
}

fn token_key(secret_var: &str, pem_var: &str, jwks_var: &str) -> Result<TokenKey> {
    let keys: Vec<TokenKey> = [
        env::var(secret_var).ok().map(TokenKey::Secret),
        env::var(pem_var).ok().map(TokenKey::RsaPem),
        env::var(jwks_var).ok().map(TokenKey::Jwks),
    ]
    .into_iter()
    .flatten()
    .collect();

    match <[TokenKey; 1]>::try_from(keys) {
        Ok([key]) => Ok(key),
        Err(_) => bail!(
            "Exactly one of {}, {} or {} must be set",
            secret_var,
            pem_var,
            jwks_var
        ),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

use jsonwebtoken::{decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("No verification key for kid {0:?}")]
    UnknownKeyId(Option<String>),

    #[error("Invalid key set: {0}")]
    InvalidKeySet(String),
}

#[derive(Clone)]
enum VerifyingKeys {
    Single(DecodingKey),
    /// Selected by the token header's `kid`
    ByKeyId(HashMap<String, DecodingKey>),
}

/// Verifies bearer tokens and hands back every claim they carry.
///
/// Used for both ID tokens and App Check tokens. Issuing tokens is the
/// identity provider's job, so there is no encoding side here.
#[derive(Clone)]
pub struct TokenVerifier {
    keys: VerifyingKeys,
    validation: Validation,
}

impl TokenVerifier {
    /// HS256 shared secret (local development and tests)
    pub fn from_secret(secret: &str, issuer: Option<&str>, audience: Option<&str>) -> Self {
        Self {
            keys: VerifyingKeys::Single(DecodingKey::from_secret(secret.as_bytes())),
            validation: validation(Algorithm::HS256, issuer, audience),
        }
    }

    /// One RS256 public key in PEM form, used whatever the token's `kid`
    pub fn from_rsa_pem(
        pem: &[u8],
        issuer: Option<&str>,
        audience: Option<&str>,
    ) -> Result<Self, TokenError> {
        Ok(Self {
            keys: VerifyingKeys::Single(DecodingKey::from_rsa_pem(pem)?),
            validation: validation(Algorithm::RS256, issuer, audience),
        })
    }

    /// RS256 keys from a JWKS document. Each token is checked against the key
    /// named by its `kid` header.
    pub fn from_jwks(
        jwks: &str,
        issuer: Option<&str>,
        audience: Option<&str>,
    ) -> Result<Self, TokenError> {
        let set: JwkSet =
            serde_json::from_str(jwks).map_err(|e| TokenError::InvalidKeySet(e.to_string()))?;

        let mut keys = HashMap::new();
        for jwk in &set.keys {
            let kid = jwk
                .common
                .key_id
                .clone()
                .ok_or_else(|| TokenError::InvalidKeySet("key without kid".to_string()))?;
            keys.insert(kid, DecodingKey::from_jwk(jwk)?);
        }
        if keys.is_empty() {
            return Err(TokenError::InvalidKeySet("no keys".to_string()));
        }

        Ok(Self {
            keys: VerifyingKeys::ByKeyId(keys),
            validation: validation(Algorithm::RS256, issuer, audience),
        })
    }

    /// Verify signature, expiry and the configured issuer/audience
    pub fn verify(&self, token: &str) -> Result<Map<String, Value>, TokenError> {
        let key = match &self.keys {
            VerifyingKeys::Single(key) => key,
            VerifyingKeys::ByKeyId(keys) => {
                let kid = decode_header(token)?.kid;
                kid.as_deref()
                    .and_then(|kid| keys.get(kid))
                    .ok_or_else(|| TokenError::UnknownKeyId(kid.clone()))?
            }
        };

        Ok(decode::<Map<String, Value>>(token, key, &self.validation)?.claims)
    }
}

fn validation(algorithm: Algorithm, issuer: Option<&str>, audience: Option<&str>) -> Validation {
    let mut validation = Validation::new(algorithm);
    if let Some(issuer) = issuer {
        validation.set_issuer(&[issuer]);
    }
    match audience {
        Some(audience) => validation.set_audience(&[audience]),
        None => validation.validate_aud = false,
    }
    validation
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const RSA_PRIVATE_PEM: &str =
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/rsa_private.pem"));
    const RSA_PUBLIC_PEM: &str =
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/rsa_public.pem"));
    // Modulus of testdata/rsa_public.pem
    const RSA_MODULUS: &str = "ktPVNo5-p-Z1uaQZpv0T1rzdTI8Memi_NI6t41BElhDiC4yZi3B1GLn3naf9_nhMW9gIkMoA1t465PfWA9w9mze-1Wvm9fNPUzmqOYVFyaArBBZwrpw-Dgl4rGeB7gzV7WtZsD9ZBBZo9SngSC_bGMIQra5IK-KNsq6tWzeB12_vWPytlqtUPXnuqYWumI-aHk91CjZZA0Z5zYX6kuxGzCKdDnYOiaVHj7QduMvE0EDoUJ_KEM0tslk5glGHbRCudrkpyDCaecoo_pIFwBqcf0aL7ycrbI4G_Z8qjvBzJ-D6g74wnuRtYvHa-KWrS9_yKaZyO0OMB7hqLJlbncwGxQ";

    fn sign(secret: &str, claims: Value) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn sign_rsa(kid: Option<&str>, claims: Value) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = kid.map(str::to_string);
        encode(
            &header,
            &claims,
            &EncodingKey::from_rsa_pem(RSA_PRIVATE_PEM.as_bytes()).unwrap(),
        )
        .unwrap()
    }

    fn jwks(kid: &str) -> String {
        json!({
            "keys": [{
                "kty": "RSA",
                "kid": kid,
                "alg": "RS256",
                "use": "sig",
                "n": RSA_MODULUS,
                "e": "AQAB"
            }]
        })
        .to_string()
    }

    fn exp() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    #[test]
    fn test_verify_returns_all_claims() {
        let verifier = TokenVerifier::from_secret("secret", Some("issuer"), Some("project"));
        let token = sign(
            "secret",
            json!({
                "sub": "uid-1",
                "iss": "issuer",
                "aud": "project",
                "exp": exp(),
                "SystemRole": "admin",
                "ChatRole": null
            }),
        );

        let claims = verifier.verify(&token).unwrap();
        assert_eq!(claims["sub"], "uid-1");
        assert_eq!(claims["SystemRole"], "admin");
        assert_eq!(claims.get("ChatRole"), Some(&Value::Null));
    }

    #[test]
    fn test_wrong_secret() {
        let verifier = TokenVerifier::from_secret("secret1", None, None);
        let token = sign("secret2", json!({"sub": "uid-1", "exp": exp()}));
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_wrong_issuer() {
        let verifier = TokenVerifier::from_secret("secret", Some("issuer"), None);
        let token = sign("secret", json!({"sub": "uid-1", "iss": "other", "exp": exp()}));
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_wrong_audience() {
        let verifier = TokenVerifier::from_secret("secret", None, Some("project"));
        let token = sign("secret", json!({"sub": "uid-1", "aud": "elsewhere", "exp": exp()}));
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_audience_ignored_when_unconfigured() {
        let verifier = TokenVerifier::from_secret("secret", None, None);
        let token = sign("secret", json!({"sub": "uid-1", "aud": "anything", "exp": exp()}));
        assert!(verifier.verify(&token).is_ok());
    }

    #[test]
    fn test_expired_token() {
        let verifier = TokenVerifier::from_secret("secret", None, None);
        let expired = chrono::Utc::now().timestamp() - 3600;
        let token = sign("secret", json!({"sub": "uid-1", "exp": expired}));
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_invalid_token() {
        let verifier = TokenVerifier::from_secret("secret", None, None);
        assert!(verifier.verify("invalid_token").is_err());
    }

    #[test]
    fn test_rsa_pem_ignores_kid() {
        let verifier = TokenVerifier::from_rsa_pem(RSA_PUBLIC_PEM.as_bytes(), None, None).unwrap();
        let token = sign_rsa(Some("anything"), json!({"sub": "uid-1", "exp": exp()}));
        assert_eq!(verifier.verify(&token).unwrap()["sub"], "uid-1");
    }

    #[test]
    fn test_jwks_selects_key_by_kid() {
        let verifier = TokenVerifier::from_jwks(&jwks("key-1"), None, None).unwrap();
        let token = sign_rsa(Some("key-1"), json!({"sub": "uid-1", "exp": exp()}));
        assert_eq!(verifier.verify(&token).unwrap()["sub"], "uid-1");
    }

    #[test]
    fn test_jwks_unknown_or_missing_kid() {
        let verifier = TokenVerifier::from_jwks(&jwks("key-1"), None, None).unwrap();

        let rotated = sign_rsa(Some("key-2"), json!({"sub": "uid-1", "exp": exp()}));
        assert!(matches!(
            verifier.verify(&rotated),
            Err(TokenError::UnknownKeyId(Some(kid))) if kid == "key-2"
        ));

        let unnamed = sign_rsa(None, json!({"sub": "uid-1", "exp": exp()}));
        assert!(matches!(
            verifier.verify(&unnamed),
            Err(TokenError::UnknownKeyId(None))
        ));
    }

    #[test]
    fn test_jwks_rejects_hs256_token() {
        let verifier = TokenVerifier::from_jwks(&jwks("key-1"), None, None).unwrap();
        let mut header = Header::default();
        header.kid = Some("key-1".to_string());
        let token = encode(
            &header,
            &json!({"sub": "uid-1", "exp": exp()}),
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_invalid_key_sets() {
        assert!(matches!(
            TokenVerifier::from_jwks("not json", None, None),
            Err(TokenError::InvalidKeySet(_))
        ));
        assert!(matches!(
            TokenVerifier::from_jwks(r#"{"keys": []}"#, None, None),
            Err(TokenError::InvalidKeySet(_))
        ));
        let without_kid = json!({"keys": [{"kty": "RSA", "n": RSA_MODULUS, "e": "AQAB"}]});
        assert!(matches!(
            TokenVerifier::from_jwks(&without_kid.to_string(), None, None),
            Err(TokenError::InvalidKeySet(_))
        ));
    }
}

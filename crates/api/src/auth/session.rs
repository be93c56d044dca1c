//! Session token generation and verification.
//!
//! Session tokens are HS256-signed JWTs carried in the session cookie. Tokens
//! minted here carry [`SessionClaims`]; tokens from the external login flow
//! only need a valid signature and an `exp`, so verification yields the
//! looser [`VerifiedClaims`]. Verification reports why a token was rejected
//! so callers can log the cause; HTTP responses never expose it.

use aurora_core::types::DbId;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Claims embedded in tokens minted by [`generate_session_token`].
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Subject -- the user's internal id.
    pub sub: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Claims of a verified token. Only `exp` is required.
#[derive(Debug, Deserialize, Clone)]
pub struct VerifiedClaims {
    pub exp: i64,
    #[serde(default)]
    pub sub: Option<Value>,
}

impl VerifiedClaims {
    /// The subject as an internal user id. Accepts a numeric `sub` or a
    /// decimal string one.
    pub fn user_id(&self) -> Option<DbId> {
        match self.sub.as_ref()? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

/// Configuration for the session cookie and its signing secret.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session token.
    pub cookie_name: String,
    /// `Path` the login flow sets the cookie with (default: `/`).
    pub cookie_path: String,
    /// `Domain` the login flow sets the cookie with, if any.
    pub cookie_domain: Option<String>,
    /// HMAC-SHA256 secret shared with the login flow.
    pub secret: String,
    /// Session lifetime in minutes (default: 7 days).
    pub ttl_mins: i64,
}

/// Default session cookie name.
pub const DEFAULT_COOKIE_NAME: &str = "aurora_session";
/// Default session lifetime in minutes (7 days).
const DEFAULT_TTL_MINS: i64 = 7 * 24 * 60;

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var                 | Required | Default          |
    /// |-------------------------|----------|------------------|
    /// | `SESSION_SECRET`        | **yes**  | --               |
    /// | `SESSION_COOKIE_NAME`   | no       | `aurora_session` |
    /// | `SESSION_COOKIE_PATH`   | no       | `/`              |
    /// | `SESSION_COOKIE_DOMAIN` | no       | unset            |
    /// | `SESSION_TTL_MINS`      | no       | `10080`          |
    ///
    /// # Panics
    ///
    /// Panics if `SESSION_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret = std::env::var("SESSION_SECRET")
            .expect("SESSION_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "SESSION_SECRET must not be empty");

        let cookie_name =
            std::env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| DEFAULT_COOKIE_NAME.into());

        let cookie_path = std::env::var("SESSION_COOKIE_PATH").unwrap_or_else(|_| "/".into());
        let cookie_domain = std::env::var("SESSION_COOKIE_DOMAIN")
            .ok()
            .filter(|domain| !domain.is_empty());

        let ttl_mins: i64 = std::env::var("SESSION_TTL_MINS")
            .unwrap_or_else(|_| DEFAULT_TTL_MINS.to_string())
            .parse()
            .expect("SESSION_TTL_MINS must be a valid i64");

        Self {
            cookie_name,
            cookie_path,
            cookie_domain,
            secret,
            ttl_mins,
        }
    }
}

/// Why a session token was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRejection {
    /// No session cookie on the request.
    Missing,
    /// Signature does not match the shared secret.
    BadSignature,
    /// Signature is valid but the token is past its `exp`.
    Expired,
    /// Not a decodable token for this scheme.
    Malformed,
}

impl SessionRejection {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionRejection::Missing => "missing",
            SessionRejection::BadSignature => "bad_signature",
            SessionRejection::Expired => "expired",
            SessionRejection::Malformed => "malformed",
        }
    }
}

/// Generate an HS256 session token for the given user.
pub fn generate_session_token(
    user_id: DbId,
    config: &SessionConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = SessionClaims {
        sub: user_id,
        exp: now + config.ttl_mins * 60,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify a session token, returning its claims or the rejection cause.
///
/// Checks signature and expiration only; no other claim is required.
/// `None` (no cookie) is rejected as [`SessionRejection::Missing`].
pub fn verify_session_token(
    token: Option<&str>,
    config: &SessionConfig,
) -> Result<VerifiedClaims, SessionRejection> {
    let token = token.ok_or(SessionRejection::Missing)?;

    decode::<VerifiedClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature => SessionRejection::BadSignature,
        ErrorKind::ExpiredSignature => SessionRejection::Expired,
        _ => SessionRejection::Malformed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to build a test config with a known secret.
    fn test_config() -> SessionConfig {
        SessionConfig {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            cookie_path: "/".to_string(),
            cookie_domain: None,
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            ttl_mins: 60,
        }
    }

    #[test]
    fn generated_token_verifies() {
        let config = test_config();
        let token = generate_session_token(42, &config).expect("token generation should succeed");

        let claims = verify_session_token(Some(&token), &config).expect("token should verify");
        assert_eq!(claims.user_id(), Some(42));
        assert!(claims.exp > chrono::Utc::now().timestamp());
    }

    fn sign(payload: &Value, config: &SessionConfig) -> String {
        encode(
            &Header::default(),
            payload,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed")
    }

    #[test]
    fn string_subject_without_iat_or_jti_verifies() {
        let config = test_config();
        let exp = chrono::Utc::now().timestamp() + 600;
        let token = sign(&serde_json::json!({ "sub": "42", "exp": exp }), &config);

        let claims = verify_session_token(Some(&token), &config).expect("token should verify");
        assert_eq!(claims.user_id(), Some(42));
    }

    #[test]
    fn token_without_subject_verifies_but_has_no_user() {
        let config = test_config();
        let exp = chrono::Utc::now().timestamp() + 600;
        let token = sign(&serde_json::json!({ "exp": exp, "role": "customer" }), &config);

        let claims = verify_session_token(Some(&token), &config).expect("token should verify");
        assert_eq!(claims.user_id(), None);
    }

    #[test]
    fn non_numeric_subject_has_no_user() {
        let config = test_config();
        let exp = chrono::Utc::now().timestamp() + 600;
        let token = sign(&serde_json::json!({ "sub": "auth0|abc", "exp": exp }), &config);

        let claims = verify_session_token(Some(&token), &config).expect("token should verify");
        assert_eq!(claims.user_id(), None);
    }

    #[test]
    fn token_without_exp_is_malformed() {
        let config = test_config();
        let token = sign(&serde_json::json!({ "sub": 1 }), &config);
        assert_eq!(
            verify_session_token(Some(&token), &config).unwrap_err(),
            SessionRejection::Malformed
        );
    }

    #[test]
    fn missing_token_is_rejected() {
        let result = verify_session_token(None, &test_config());
        assert_eq!(result.unwrap_err(), SessionRejection::Missing);
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config();

        // Use a margin well beyond the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = SessionClaims {
            sub: 1,
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        let result = verify_session_token(Some(&token), &config);
        assert_eq!(result.unwrap_err(), SessionRejection::Expired);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let config = test_config();
        let other = SessionConfig {
            secret: "secret-bravo".to_string(),
            ..test_config()
        };

        let token = generate_session_token(1, &other).expect("token generation should succeed");
        let result = verify_session_token(Some(&token), &config);
        assert_eq!(result.unwrap_err(), SessionRejection::BadSignature);
    }

    #[test]
    fn garbage_token_is_malformed() {
        let result = verify_session_token(Some("not-a-jwt"), &test_config());
        assert_eq!(result.unwrap_err(), SessionRejection::Malformed);
    }
}

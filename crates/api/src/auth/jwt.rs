//! Signed session tokens and refresh-token helpers.
//!
//! A session token is an HS256 JWT whose claims are the [`SessionPayload`]
//! plus `iat`, `exp` and a random `jti`. Every token is also recorded as an
//! `admin_sessions` row keyed by its SHA-256 digest, so a token can be
//! revoked before it expires. Refresh tokens are opaque random strings;
//! only their digest is stored.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sonaverse_core::types::{DbId, Timestamp};
use uuid::Uuid;

/// Session token lifetime.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Refresh token lifetime.
pub const REFRESH_TTL_DAYS: i64 = 30;

/// Identity carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    pub user_id: DbId,
    pub email: String,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(flatten)]
    payload: SessionPayload,
    iat: i64,
    exp: i64,
    jti: String,
}

/// Configuration for session token signing.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
}

impl JwtConfig {
    /// Load from `JWT_SECRET`.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");
        Self { secret }
    }
}

/// Sign a session token issued now with a fresh token id.
pub fn create_token(payload: &SessionPayload, config: &JwtConfig) -> Result<String, jsonwebtoken::errors::Error> {
    create_token_at(payload, Utc::now(), &Uuid::new_v4().to_string(), config)
}

/// Sign a session token for an explicit issue time and token id.
///
/// Deterministic: the same payload, time, id and secret yield the same token.
pub fn create_token_at(
    payload: &SessionPayload,
    issued_at: Timestamp,
    jti: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = issued_at.timestamp();
    let claims = Claims {
        payload: payload.clone(),
        iat,
        exp: iat + Duration::days(SESSION_TTL_DAYS).num_seconds(),
        jti: jti.to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify a session token and return its payload.
///
/// Malformed, tampered and expired tokens all yield `None`.
pub fn verify_token(token: &str, config: &JwtConfig) -> Option<SessionPayload> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .ok()
    .map(|data| data.claims.payload)
}

/// Expiry of a token issued at `issued_at`.
pub fn session_expiry(issued_at: Timestamp) -> Timestamp {
    issued_at + Duration::days(SESSION_TTL_DAYS)
}

/// Generate a random refresh token.
///
/// Returns `(plaintext, sha256_hex)`. The plaintext goes to the client; only
/// the hash is persisted.
pub fn generate_refresh_token() -> (String, String) {
    let bytes: [u8; 32] = rand::random();
    let plaintext: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    let hash = hash_token(&plaintext);
    (plaintext, hash)
}

/// SHA-256 hex digest used to store session and refresh tokens.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        }
    }

    fn payload() -> SessionPayload {
        SessionPayload {
            user_id: 42,
            email: "admin@sonaverse.kr".to_string(),
            name: "관리자".to_string(),
            role: "admin".to_string(),
        }
    }

    #[test]
    fn create_then_verify_round_trips_payload() {
        let config = test_config();
        let token = create_token(&payload(), &config).expect("token generation should succeed");
        assert_eq!(verify_token(&token, &config), Some(payload()));
    }

    #[test]
    fn same_inputs_give_same_token() {
        let config = test_config();
        let at = Utc::now();
        let a = create_token_at(&payload(), at, "fixed", &config).unwrap();
        let b = create_token_at(&payload(), at, "fixed", &config).unwrap();
        let c = create_token_at(&payload(), at, "other", &config).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn token_older_than_seven_days_fails() {
        let config = test_config();
        let issued = Utc::now() - Duration::days(SESSION_TTL_DAYS) - Duration::minutes(1);
        let token = create_token_at(&payload(), issued, "old", &config).unwrap();
        assert_eq!(verify_token(&token, &config), None);

        let recent = Utc::now() - Duration::days(SESSION_TTL_DAYS - 1);
        let token = create_token_at(&payload(), recent, "recent", &config).unwrap();
        assert!(verify_token(&token, &config).is_some());
    }

    #[test]
    fn wrong_secret_and_garbage_fail() {
        let token = create_token(&payload(), &test_config()).unwrap();
        let other = JwtConfig {
            secret: "secret-bravo".to_string(),
        };
        assert_eq!(verify_token(&token, &other), None);
        assert_eq!(verify_token("not-a-jwt", &test_config()), None);
        assert_eq!(verify_token("", &test_config()), None);
    }

    #[test]
    fn refresh_token_hash_matches() {
        let (plaintext, hash) = generate_refresh_token();
        assert_eq!(plaintext.len(), 64);
        assert_eq!(hash, hash_token(&plaintext));
        assert_ne!(generate_refresh_token().0, plaintext);
    }
}

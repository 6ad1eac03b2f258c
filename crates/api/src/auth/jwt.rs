//! Issuing and checking the HS256 session tokens.
//!
//! A login hands out one long-lived token (default 7 days) and that is
//! the whole session story: no refresh endpoint, no server-side session
//! row. When the token expires the client logs in again.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use griot_core::types::DbId;

/// Payload carried inside every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The account's database id (standard `sub` claim).
    pub sub: DbId,
    /// Email of the account when the token was issued.
    pub email: String,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    /// Issue time, seconds since the Unix epoch.
    pub iat: i64,
    /// Random per-token id, useful when correlating logs.
    pub jti: String,
}

/// Signing settings shared by token issue and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret for HS256. Both sides of the token lifecycle use it.
    pub secret: String,
    /// How many days a token stays valid.
    pub expiry_days: i64,
}

const DEFAULT_EXPIRY_DAYS: i64 = 7;

impl JwtConfig {
    /// Read signing settings from the environment.
    ///
    /// | Env Var           | Required | Default |
    /// |-------------------|----------|---------|
    /// | `JWT_SECRET`      | **yes**  | --      |
    /// | `JWT_EXPIRY_DAYS` | no       | `7`     |
    ///
    /// # Panics
    ///
    /// Panics when `JWT_SECRET` is missing or empty. An unset secret
    /// must never silently fall back to a guessable default.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let expiry_days = match std::env::var("JWT_EXPIRY_DAYS") {
            Ok(raw) => raw
                .parse()
                .expect("JWT_EXPIRY_DAYS must be a whole number of days"),
            Err(_) => DEFAULT_EXPIRY_DAYS,
        };

        Self { secret, expiry_days }
    }
}

/// Issue a signed token for the given account.
pub fn generate_token(
    user_id: DbId,
    email: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let issued_at = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user_id,
        email: email.to_owned(),
        exp: issued_at + config.expiry_days * 86_400,
        iat: issued_at,
        jti: Uuid::new_v4().to_string(),
    };

    // Header::default() selects HS256.
    let key = EncodingKey::from_secret(config.secret.as_bytes());
    encode(&Header::default(), &claims, &key)
}

/// Check a token's signature and expiry, returning its [`Claims`].
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(config.secret.as_bytes());
    // Validation::default() enforces HS256 and the `exp` claim.
    decode::<Claims>(token, &key, &Validation::default()).map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "unit-test-signing-secret-0123456789".to_string(),
            expiry_days: 7,
        }
    }

    #[test]
    fn round_trip_preserves_claims() {
        let config = test_config();
        let token =
            generate_token(42, "fatou@example.sn", &config).expect("issuing should succeed");

        let claims = validate_token(&token, &config).expect("validation should succeed");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "fatou@example.sn");
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 3600);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config();

        // Hand-build a token that expired ten minutes ago, far past the
        // decoder's default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            email: "late@example.sn".to_string(),
            exp: now - 600,
            iat: now - 1_200,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let issuing = JwtConfig {
            secret: "first-signing-secret".to_string(),
            expiry_days: 7,
        };
        let verifying = JwtConfig {
            secret: "second-signing-secret".to_string(),
            expiry_days: 7,
        };

        let token =
            generate_token(1, "user@example.sn", &issuing).expect("issuing should succeed");

        assert!(validate_token(&token, &verifying).is_err());
    }
}

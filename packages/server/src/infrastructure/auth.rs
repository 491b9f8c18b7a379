//! JWT credential verification.
//!
//! Tokens are issued by the account service; the hub only verifies them at
//! handshake time. The encoding half is kept for the demo seeder and tests.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::{TokenError, TokenVerifier, UserId};

const DEFAULT_SECRET: &str = "rostrum-dev-secret-change-me";

/// JWT claims carried by a connection credential.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account id.
    pub sub: String,
    /// Expiry (Unix seconds).
    pub exp: i64,
    /// Issued at (Unix seconds).
    pub iat: i64,
}

/// HMAC-based token verifier (and issuer, for dev/test use).
pub struct JwtVerifier {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Build a verifier from the `JWT_SECRET` environment variable, falling
    /// back to the development secret.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string());
        if secret == DEFAULT_SECRET {
            tracing::warn!("JWT_SECRET not set, using the built-in development secret");
        }
        Self::new(&secret)
    }

    /// Issue a token for the given account, valid for `ttl`.
    pub fn issue(&self, user_id: &UserId, ttl: Duration) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.as_str().to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding).map_err(|_| TokenError::Invalid)
    }
}

impl TokenVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|_| TokenError::Invalid)?;
        Ok(UserId::new(data.claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_token_verifies_back_to_subject() {
        // given:
        let verifier = JwtVerifier::new("test-secret");
        let user_id = UserId::new("alice");

        // when:
        let token = verifier.issue(&user_id, Duration::hours(1)).unwrap();
        let verified = verifier.verify(&token);

        // then:
        assert_eq!(verified, Ok(user_id));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let verifier = JwtVerifier::new("test-secret");
        assert_eq!(verifier.verify("not-a-token"), Err(TokenError::Invalid));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        // given:
        let issuer = JwtVerifier::new("other-secret");
        let verifier = JwtVerifier::new("test-secret");
        let token = issuer
            .issue(&UserId::new("alice"), Duration::hours(1))
            .unwrap();

        // when / then:
        assert_eq!(verifier.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // given: a token that expired an hour ago
        let verifier = JwtVerifier::new("test-secret");
        let token = verifier
            .issue(&UserId::new("alice"), Duration::hours(-1))
            .unwrap();

        // when / then:
        assert_eq!(verifier.verify(&token), Err(TokenError::Invalid));
    }
}

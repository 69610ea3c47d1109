use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tokens expire exactly one hour after issuance; there is no refresh
/// mechanism, so an expired token requires logging in again.
const TOKEN_TTL_SECONDS: i64 = 60 * 60;

/// Claims encoded within an issued token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's unique identifier.
    pub sub: i32,
    /// Issuance timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Why a token failed verification.
///
/// Callers collapse both kinds into a single 401 on the wire, but the
/// distinction is kept for logging and tests.
#[derive(Debug)]
pub enum TokenError {
    /// The embedded expiry has passed.
    Expired,
    /// Bad signature, malformed structure, or any other decode failure.
    Invalid(jsonwebtoken::errors::Error),
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenError::Expired => write!(f, "token expired"),
            TokenError::Invalid(e) => write!(f, "invalid token: {}", e),
        }
    }
}

/// Signing and verification keys derived from the process-wide secret.
///
/// Constructed once at startup from [`crate::config::Config`] and shared as
/// application data; rotating the secret invalidates all outstanding tokens.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issues a signed token whose subject is `user_id`, expiring in one hour.
    pub fn issue(&self, user_id: i32) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(TOKEN_TTL_SECONDS)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a token string and returns its claims.
    ///
    /// Validity is re-derived from the signature and expiry on every call;
    /// nothing is cached and no revocation list exists.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        // No leeway: a token is rejected the moment its expiry passes.
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_generation_and_verification() {
        let keys = TokenKeys::new("test_secret_for_gen_verify");
        let user_id = 1;
        let token = keys.issue(user_id).unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECONDS);
    }

    #[test]
    fn test_token_expiration() {
        let keys = TokenKeys::new("test_secret_for_expiration");

        // Build a token whose expiry is already in the past.
        let now = Utc::now();
        let claims = Claims {
            sub: 2,
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let expired_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test_secret_for_expiration".as_bytes()),
        )
        .unwrap();

        match keys.verify(&expired_token) {
            Err(TokenError::Expired) => {}
            Ok(_) => panic!("Token should have been rejected as expired"),
            Err(e) => panic!("Unexpected error kind for expired token: {:?}", e),
        }
    }

    #[test]
    fn test_invalid_token_signature() {
        let issuing_keys = TokenKeys::new("secret_a");
        let verifying_keys = TokenKeys::new("secret_b");

        let token = issuing_keys.issue(3).unwrap();
        match verifying_keys.verify(&token) {
            Err(TokenError::Invalid(_)) => {}
            Ok(_) => panic!("Token should have been rejected: signature mismatch"),
            Err(e) => panic!("Unexpected error kind for signature mismatch: {:?}", e),
        }
    }

    #[test]
    fn test_malformed_token() {
        let keys = TokenKeys::new("test_secret_for_malformed");
        match keys.verify("not-a-token-at-all") {
            Err(TokenError::Invalid(_)) => {}
            other => panic!("Expected Invalid for malformed token, got {:?}", other),
        }
    }
}

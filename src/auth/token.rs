//! Token issue and verification (HS256 JWT, stateless).
//!
//! No token is stored server-side: validity is a pure function of the token
//! string, the current time, and the process-wide signing secret. Tokens
//! therefore cannot be revoked before expiry.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{AppError, AppResult};

/// Claim set embedded in every issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Internal verification failures. Callers outside this module only ever see
/// these collapsed into a single `InvalidToken` error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("signature mismatch")]
    BadSignature,
    #[error("token expired")]
    Expired,
}

/// Issues and verifies tokens under one process-wide signing secret, fixed at
/// startup. Rotating the secret invalidates everything issued before.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
}

impl TokenService {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    /// Sign `{email, iat: now, exp: now + ttl}` into a bearer token.
    pub fn issue(&self, email: &str, ttl: Duration) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("sign token: {}", e)))
    }

    /// Check signature and expiry, returning the embedded claims unchanged.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.validate_exp = true;
        validation.leeway = 0;
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            _ => TokenError::Malformed,
        })
    }
}

// src/auth/tokens.rs
//! Session token issuance and verification

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::ApiError;

/// Session lifetime handed out on registration (10 hours)
pub const REGISTRATION_SESSION_TTL_SECS: i64 = 10 * 60 * 60;

/// Session lifetime handed out on login (175 hours)
pub const LOGIN_SESSION_TTL_SECS: i64 = 175 * 60 * 60;

/// JWT claims structure
#[derive(Serialize, Deserialize, Debug)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token is invalid")]
    Invalid,

    #[error("Token has expired")]
    Expired,
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        ApiError::Unauthorized(err.to_string())
    }
}

/// Issues and verifies signed session tokens.
///
/// The signing secret is a construction-time value so tests can substitute
/// a fixed one.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
}

impl TokenService {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Sign a token for `subject_id` expiring `ttl_secs` from now.
    pub fn issue(&self, subject_id: &str, ttl_secs: i64) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject_id.to_string(),
            iat: now,
            exp: now + ttl_secs,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|_| TokenError::Invalid)
    }

    /// Check signature and expiry, returning the subject id.
    ///
    /// Zero leeway: a token stops verifying the moment its expiry passes.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })?;

        Ok(data.claims.sub)
    }
}

//! Signed session tokens
//!
//! A session is an HS256 token signed with the application secret. It names
//! the user and expires after the configured lifetime; the identity itself is
//! re-loaded from the database on every request.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

use crate::error::{AuthError, AuthResult};
use crate::models::{SessionClaims, User};

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Secret used to sign session tokens
    pub secret: String,
    /// Session lifetime in seconds
    pub ttl_seconds: u64,
}

/// Issues and validates session tokens
#[derive(Clone)]
pub struct SessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new(config: &SessionConfig) -> AuthResult<Self> {
        if config.secret.is_empty() {
            return Err(AuthError::EmptySecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            ttl_seconds: config.ttl_seconds,
        })
    }

    /// Issue a session token for a user
    pub fn issue(&self, user: &User) -> AuthResult<String> {
        let now = now_seconds()?;
        let claims = SessionClaims {
            sub: user.id,
            role: user.role,
            iat: now,
            exp: now + self.ttl_seconds,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        info!("Issued session for user: {}", user.username);
        Ok(token)
    }

    /// Validate a token and return its claims
    pub fn validate(&self, token: &str) -> AuthResult<SessionClaims> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }

    /// Session lifetime in seconds
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }
}

fn now_seconds() -> AuthResult<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| AuthError::Clock(e.to_string()))
}

//! Error type for the authentication library

use thiserror::Error;

/// Errors raised while hashing credentials or handling session tokens
#[derive(Error, Debug)]
pub enum AuthError {
    /// The password hashing primitive failed
    #[error("Failed to hash password: {0}")]
    Hashing(String),

    /// A session token could not be issued or did not validate
    #[error("Invalid session token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// The session signing secret is empty
    #[error("Session secret must not be empty")]
    EmptySecret,

    /// A role name that is not admin, professor or student
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// The system clock is before the unix epoch
    #[error("Failed to get current time: {0}")]
    Clock(String),
}

/// Type alias for Result with AuthError
pub type AuthResult<T> = Result<T, AuthError>;

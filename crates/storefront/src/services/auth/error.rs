//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong email or password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The authentication backend could not complete the check.
    #[error("authentication unavailable: {0}")]
    Unavailable(String),

    /// Password too short to be accepted.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

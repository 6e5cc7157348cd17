//! Admin account setup commands.
//!
//! # Usage
//!
//! ```bash
//! # Hash a password for ADMIN_PASSWORD_HASH
//! hs-cli admin hash-password --password 'correct horse'
//!
//! # Or read it from the environment
//! ADMIN_PASSWORD='correct horse' hs-cli admin hash-password
//! ```

use hafiz_sajid_storefront::services::{AuthError, hash_password};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Shortest password accepted for the dashboard account.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Errors that can occur during admin setup.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Neither the flag nor the environment variable supplied a password.
    #[error("Missing password: pass --password or set ADMIN_PASSWORD")]
    MissingPassword,

    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,

    #[error("Hashing failed: {0}")]
    Hash(#[from] AuthError),
}

/// Produce an Argon2 PHC string for `password`, falling back to the
/// `ADMIN_PASSWORD` environment variable.
///
/// # Errors
///
/// Returns an error if no password is available, it is too short, or
/// hashing fails.
pub fn hash(password: Option<SecretString>) -> Result<String, AdminError> {
    dotenvy::dotenv().ok();

    let password = password
        .or_else(|| std::env::var("ADMIN_PASSWORD").ok().map(SecretString::from))
        .ok_or(AdminError::MissingPassword)?;

    if password.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AdminError::PasswordTooShort);
    }

    let hash = hash_password(password.expose_secret())?;
    tracing::info!("Set this in the storefront environment:");
    tracing::info!("  ADMIN_PASSWORD_HASH='{}'", hash);
    Ok(hash)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use hafiz_sajid_storefront::services::verify_password;

    #[test]
    fn test_hash_verifies_against_password() {
        let hash = hash(Some(SecretString::from("admin123"))).unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("admin123", &hash).is_ok());
    }

    #[test]
    fn test_short_password_is_rejected() {
        let err = hash(Some(SecretString::from("abc"))).unwrap_err();
        assert!(matches!(err, AdminError::PasswordTooShort));
    }
}

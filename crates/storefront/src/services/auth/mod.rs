//! Admin authentication.
//!
//! Route handlers never compare secrets. They pass the submitted credentials
//! to an [`Authenticator`] and act on the verdict it returns.

mod error;

pub use error::AuthError;

use std::time::Duration;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use hafiz_sajid_core::Email;
use secrecy::ExposeSecret;
use tracing::instrument;

use super::BoxFuture;
use crate::config::AdminConfig;
use crate::forms::{LoginSubmission, MIN_PASSWORD_LENGTH};

/// The identity established by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    pub email: Email,
}

/// Checks admin credentials.
pub trait Authenticator: Send + Sync {
    /// Resolve to the admin identity, or [`AuthError::InvalidCredentials`].
    fn authenticate<'a>(
        &'a self,
        credentials: &'a LoginSubmission,
    ) -> BoxFuture<'a, Result<AdminIdentity, AuthError>>;
}

/// Verifies credentials against the configured admin email and Argon2 hash.
///
/// The check runs after a fixed delay so that a failed attempt costs the
/// client the same time as a successful one.
pub struct PasswordHashAuthenticator {
    admin: AdminConfig,
    delay: Duration,
}

impl PasswordHashAuthenticator {
    #[must_use]
    pub const fn new(admin: AdminConfig, delay: Duration) -> Self {
        Self { admin, delay }
    }
}

impl Authenticator for PasswordHashAuthenticator {
    fn authenticate<'a>(
        &'a self,
        credentials: &'a LoginSubmission,
    ) -> BoxFuture<'a, Result<AdminIdentity, AuthError>> {
        Box::pin(self.check(credentials))
    }
}

impl PasswordHashAuthenticator {
    #[instrument(skip_all)]
    async fn check(&self, credentials: &LoginSubmission) -> Result<AdminIdentity, AuthError> {
        tokio::time::sleep(self.delay).await;

        let email_matches = credentials
            .email
            .trim()
            .eq_ignore_ascii_case(self.admin.email.as_str());

        // Always run the hash check so unknown emails take as long as known ones.
        let password_ok = verify_password(
            credentials.password.expose_secret(),
            self.admin.password_hash.expose_secret(),
        )
        .is_ok();

        if email_matches && password_ok {
            Ok(AdminIdentity {
                email: self.admin.email.clone(),
            })
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

/// Validate a new admin password.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id, producing a PHC string suitable for
/// `ADMIN_PASSWORD_HASH`.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` if the password is too short and
/// `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    validate_password(password)?;

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a PHC hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` on mismatch or a malformed hash.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

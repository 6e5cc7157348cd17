//! Collaborators injected into the HTTP layer.
//!
//! # Services
//!
//! - `auth` - Admin authentication (Argon2 password hash check)
//! - `submission` - Contact form delivery
//! - `in_flight` - Refuses duplicate submissions while one is pending
//!
//! Async collaborators are object-safe traits returning [`BoxFuture`] so the
//! router can hold them as `Arc<dyn Trait>` and tests can swap in doubles
//! that resolve immediately.

pub mod auth;
pub mod in_flight;
pub mod submission;

use std::future::Future;
use std::pin::Pin;

pub use auth::{
    AdminIdentity, AuthError, Authenticator, PasswordHashAuthenticator, hash_password,
    verify_password,
};
pub use in_flight::{FormKind, InFlight, InFlightGuard};
pub use submission::{ContactSubmitter, SimulatedContactSubmitter, SubmissionReceipt, SubmitError};

/// Boxed, sendable future returned by service traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

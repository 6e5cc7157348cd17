//! Session middleware configuration.
//!
//! Sessions are held in memory by tower-sessions. They carry the cart, the
//! listing filters, flash notices and the admin sign-in, and are lost when the
//! process restarts.

use tower_sessions::cookie::{SameSite, time::Duration};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "hs_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Lifetime of an admin session signed in with "remember me".
pub const REMEMBER_ME_DAYS: i64 = 30;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(SESSION_EXPIRY_SECONDS)))
        .with_secure(config.is_secure())
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Expiry applied to a remembered admin session.
#[must_use]
pub fn remember_me_expiry() -> Expiry {
    Expiry::OnInactivity(Duration::days(REMEMBER_ME_DAYS))
}

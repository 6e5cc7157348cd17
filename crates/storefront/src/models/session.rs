//! Session-related types.
//!
//! The cart, the product listing state and the admin sign-in all live in the
//! visitor's session. Nothing here is shared between visitors or persisted
//! across restarts.

use chrono::{DateTime, Utc};
use hafiz_sajid_core::cart::Cart;
use hafiz_sajid_core::query::{FilterState, ListingState};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

/// Session-stored admin identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSession {
    /// Admin email address.
    pub email: String,
    /// When the admin signed in.
    pub signed_in_at: DateTime<Utc>,
    /// Whether the session was extended with "remember me".
    pub remember_me: bool,
}

/// A one-shot notice shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub success: bool,
    pub message: String,
}

impl Flash {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Session keys.
pub mod keys {
    /// Key for the visitor's cart.
    pub const CART: &str = "cart";

    /// Key for the product listing filters and page.
    pub const LISTING: &str = "listing";

    /// Key for the signed-in admin.
    pub const ADMIN: &str = "admin";

    /// Key for the pending flash notice.
    pub const FLASH: &str = "flash";
}

/// Load the visitor's cart.
///
/// A visitor without a stored cart gets the demo cart when `seed_demo` is
/// set, otherwise an empty one. The fallback is not written back until the
/// cart is first mutated.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn load_cart(
    session: &Session,
    seed_demo: bool,
) -> Result<Cart, tower_sessions::session::Error> {
    let stored: Option<Cart> = session.get(keys::CART).await?;
    Ok(stored.unwrap_or_else(|| if seed_demo { Cart::demo() } else { Cart::new() }))
}

/// Store the visitor's cart.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CART, cart).await
}

/// Load the listing state, starting from `default_filters` when absent.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn load_listing(
    session: &Session,
    default_filters: FilterState,
) -> Result<ListingState, tower_sessions::session::Error> {
    let stored: Option<ListingState> = session.get(keys::LISTING).await?;
    Ok(stored.unwrap_or_else(|| ListingState::new(default_filters)))
}

/// Store the listing state.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save_listing(
    session: &Session,
    listing: &ListingState,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::LISTING, listing).await
}

/// Queue a notice for the next page render.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn set_flash(session: &Session, flash: Flash) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::FLASH, flash).await
}

/// Take the pending notice, if any.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn take_flash(session: &Session) -> Result<Option<Flash>, tower_sessions::session::Error> {
    session.remove(keys::FLASH).await
}

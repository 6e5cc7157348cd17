//! Page chrome shared by every full-page template.
//!
//! The navbar marks the link for the current path as active and shows the
//! cart badge. The mobile menu always renders closed; the page script opens
//! it and sets the scrolled style once the page passes
//! [`SCROLL_THRESHOLD_PX`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::Datelike;
use hafiz_sajid_core::catalog::{COMPANY_INFO, CompanyInfo};
use tower_sessions::Session;

use crate::middleware::CspNonce;
use crate::models::{AdminSession, Flash, load_cart, session_keys, take_flash};
use crate::state::AppState;

/// Scroll offset after which the navbar switches to its compact style.
pub const SCROLL_THRESHOLD_PX: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
}

pub const NAV_ITEMS: [NavItem; 5] = [
    NavItem { label: "Home", href: "/" },
    NavItem { label: "About", href: "/about" },
    NavItem { label: "Products", href: "/products" },
    NavItem { label: "Contact", href: "/contact" },
    NavItem { label: "Cart", href: "/cart" },
];

/// A navbar entry as rendered for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

/// Whether `href` is the section containing `path`.
#[must_use]
pub fn is_active(href: &str, path: &str) -> bool {
    if href == "/" {
        return path == "/";
    }
    path == href
        || path
            .strip_prefix(href)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Navbar, footer and flash data for one page render.
#[derive(Debug, Clone)]
pub struct Layout {
    pub nav: Vec<NavLink>,
    pub cart_count: u32,
    pub nonce: String,
    pub flash: Option<Flash>,
    pub admin_signed_in: bool,
    pub company: CompanyInfo,
    pub year: i32,
    pub scroll_threshold: u32,
}

impl Layout {
    /// Build the layout for `path`.
    #[must_use]
    pub fn new(path: &str, cart_count: u32, nonce: String) -> Self {
        Self {
            nav: NAV_ITEMS
                .iter()
                .map(|item| NavLink {
                    label: item.label,
                    href: item.href,
                    active: is_active(item.href, path),
                })
                .collect(),
            cart_count,
            nonce,
            flash: None,
            admin_signed_in: false,
            company: COMPANY_INFO,
            year: chrono::Utc::now().year(),
            scroll_threshold: SCROLL_THRESHOLD_PX,
        }
    }
}

impl FromRequestParts<AppState> for Layout {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let nonce = parts
            .extensions
            .get::<CspNonce>()
            .map(|nonce| nonce.value().to_owned())
            .unwrap_or_default();

        let Some(session) = parts.extensions.get::<Session>().cloned() else {
            return Ok(Self::new(parts.uri.path(), 0, nonce));
        };

        let cart_count = match load_cart(&session, state.config().seed_demo_cart).await {
            Ok(cart) => cart.item_count(),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load cart for navbar");
                0
            }
        };

        let mut layout = Self::new(parts.uri.path(), cart_count, nonce);
        layout.flash = take_flash(&session).await.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Failed to read flash notice");
            None
        });
        layout.admin_signed_in = session
            .get::<AdminSession>(session_keys::ADMIN)
            .await
            .ok()
            .flatten()
            .is_some();

        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_link_follows_path() {
        let layout = Layout::new("/products/3", 2, String::new());
        let active: Vec<&str> = layout
            .nav
            .iter()
            .filter(|link| link.active)
            .map(|link| link.label)
            .collect();
        assert_eq!(active, vec!["Products"]);
        assert_eq!(layout.cart_count, 2);
    }

    #[test]
    fn test_home_only_active_on_root() {
        assert!(is_active("/", "/"));
        assert!(!is_active("/", "/about"));
        assert!(is_active("/cart", "/cart"));
        assert!(!is_active("/cart", "/cartoons"));
    }

    #[test]
    fn test_new_layout_has_no_flash() {
        let layout = Layout::new("/", 0, "nonce".to_string());
        assert!(layout.flash.is_none());
        assert!(!layout.admin_signed_in);
        assert_eq!(layout.scroll_threshold, 20);
    }
}

//! Session-stored models for the storefront.

pub mod session;

pub use session::{
    AdminSession, Flash, keys as session_keys, load_cart, load_listing, save_cart, save_listing,
    set_flash, take_flash,
};

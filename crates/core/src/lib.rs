//! Hafiz Sajid Core - Storefront domain library.
//!
//! This crate provides the domain logic shared by the storefront server and
//! the `hs-cli` tool:
//! - `storefront` - Public-facing site with cart, contact form and admin pages
//! - `cli` - Command-line access to the catalog and admin credential tooling
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP,
//! no sessions. Everything here can be exercised headlessly from unit tests.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, and statuses
//! - [`catalog`] - The fixed product catalog, categories and company info
//! - [`query`] - Filter, sort and paginate engine over the catalog
//! - [`cart`] - Line items, coupons, shipping and the derived order summary

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod query;
pub mod types;

pub use types::*;

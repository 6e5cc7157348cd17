//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                           - Home page
//! GET  /about                      - Company page
//! GET  /health                     - Health check
//!
//! # Products
//! GET  /products                   - Product listing (filters, sort, page, view)
//! GET  /products/:id               - Product detail
//! GET  /products/:id/quick-view    - Quick view fragment
//!
//! # Cart (redirect, or badge fragment for enhanced requests)
//! GET  /cart                       - Cart page
//! POST /cart/add                   - Add to cart
//! POST /cart/update                - Set quantity
//! POST /cart/increment             - Quantity + 1
//! POST /cart/decrement             - Quantity - 1
//! POST /cart/remove                - Remove line
//! POST /cart/clear                 - Clear (confirm=true)
//! POST /cart/coupon                - Apply coupon
//! POST /cart/coupon/remove         - Remove coupon
//! POST /cart/shipping              - Select shipping method
//! GET  /cart/count                 - Cart count badge (fragment)
//!
//! # Checkout
//! POST /checkout                   - Start checkout (refused for an empty cart)
//! GET  /checkout                   - Order review
//!
//! # Contact (rate limited POST)
//! GET  /contact                    - Contact form and FAQ
//! POST /contact                    - Submit message
//!
//! # Admin (rate limited login POST)
//! GET  /admin/login                - Login page
//! POST /admin/login                - Login action
//! POST /admin/logout               - Logout action
//! GET  /admin/dashboard            - Dashboard (requires admin)
//! POST /admin/products/:id/edit    - Mock actions returning a notice
//! POST /admin/products/:id/delete
//! POST /admin/products/:id/restock
//! POST /admin/orders/:id/view
//! POST /admin/orders/:id/update
//! POST /admin/customers/:id/view
//!
//! # JSON API (rate limited)
//! GET  /api/products               - Catalog page
//! GET  /api/cart                   - Cart and summary
//! ```

pub mod admin;
pub mod api;
pub mod cart;
pub mod contact;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::{api_rate_limiter, form_rate_limiter};
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
        .route("/{id}/quick-view", get(products::quick_view))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/increment", post(cart::increment))
        .route("/decrement", post(cart::decrement))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/coupon", post(cart::apply_coupon))
        .route("/coupon/remove", post(cart::remove_coupon))
        .route("/shipping", post(cart::set_shipping))
        .route("/count", get(cart::count))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/login",
            post(admin::login)
                .layer(form_rate_limiter())
                .get(admin::login_page),
        )
        .route("/logout", post(admin::logout))
        .route("/dashboard", get(admin::dashboard))
        .route("/products/{id}/edit", post(admin::edit_product))
        .route("/products/{id}/delete", post(admin::delete_product))
        .route("/products/{id}/restock", post(admin::restock_product))
        .route("/orders/{id}/view", post(admin::view_order))
        .route("/orders/{id}/update", post(admin::update_order))
        .route("/customers/{id}/view", post(admin::view_customer))
}

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(api::products))
        .route("/cart", get(api::cart))
        .layer(api_rate_limiter())
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/about", get(home::about))
        .route("/health", get(health))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", get(cart::checkout).post(cart::begin_checkout))
        .route(
            "/contact",
            post(contact::submit)
                .layer(form_rate_limiter())
                .get(contact::show),
        )
        .nest("/admin", admin_routes())
        .nest("/api", api_routes())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

//! JSON endpoints.
//!
//! Read-only views of the catalog engine and the visitor's cart for scripts
//! and tooling. They accept the same query parameters as the HTML pages.

use axum::{
    Json,
    extract::{Query, State},
};
use hafiz_sajid_core::cart::{Cart, CartSummary};
use hafiz_sajid_core::catalog::{self, Product};
use hafiz_sajid_core::query::{Page, filter_and_sort, paginate};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::models::load_cart;
use crate::routes::products::ListingQuery;
use crate::state::AppState;

/// Filtered, sorted and paginated catalog products.
#[instrument]
pub async fn products(Query(query): Query<ListingQuery>) -> Json<Page<&'static Product>> {
    let filters = query.filters();
    let matching = filter_and_sort(catalog::products(), &filters);
    Json(paginate(&matching, query.page(), query.view().page_size()))
}

/// The visitor's cart with its derived totals.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart: Cart,
    pub summary: CartSummary,
}

#[instrument(skip(state, session))]
pub async fn cart(State(state): State<AppState>, session: Session) -> Result<Json<CartResponse>> {
    let cart = load_cart(&session, state.config().seed_demo_cart).await?;
    let summary = cart.summary();
    Ok(Json(CartResponse { cart, summary }))
}

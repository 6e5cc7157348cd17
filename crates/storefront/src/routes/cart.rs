//! Cart route handlers.
//!
//! The cart lives in the visitor's session. Every mutation loads it, applies
//! one `Cart` operation, stores it back and redirects to the cart page with a
//! flash notice. Requests sent by the page script (`HX-Request` header) get
//! the cart count badge fragment and an `HX-Trigger: cart-updated` header
//! instead of a redirect.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use hafiz_sajid_core::cart::{
    Cart, CartError, CartLineItem, CartSummary, QuantityChange, ShippingMethod, TAX_RATE_PERCENT,
    UnknownShippingMethod,
};
use hafiz_sajid_core::{ProductId, catalog};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::layout::Layout;
use crate::models::{Flash, load_cart, save_cart, set_flash};
use crate::state::AppState;

/// Header set by the page script on enhanced requests.
pub const HX_REQUEST: &str = "hx-request";

/// Whether the request wants a fragment instead of a redirect.
#[must_use]
pub fn wants_fragment(headers: &HeaderMap) -> bool {
    headers.contains_key(HX_REQUEST)
}

// =============================================================================
// Views
// =============================================================================

/// Cart item display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub product_id: i32,
    pub name: String,
    pub description: String,
    pub image: String,
    pub category_name: &'static str,
    pub unit_price: String,
    pub original_price: Option<String>,
    pub line_total: String,
    pub quantity: u32,
    pub max_quantity: u32,
    pub can_increment: bool,
    pub can_decrement: bool,
    pub in_stock: bool,
}

impl From<&CartLineItem> for CartItemView {
    fn from(item: &CartLineItem) -> Self {
        Self {
            product_id: item.product_id.as_i32(),
            name: item.name.clone(),
            description: item.description.clone(),
            image: item.image.clone(),
            category_name: item.category.name(),
            unit_price: item.unit_price.to_string(),
            original_price: item.original_price.map(|price| price.to_string()),
            line_total: item.line_total().to_string(),
            quantity: item.quantity,
            max_quantity: item.max_quantity,
            can_increment: item.can_increment(),
            can_decrement: item.can_decrement(),
            in_stock: item.in_stock,
        }
    }
}

/// Order summary display data for templates.
#[derive(Debug, Clone)]
pub struct SummaryView {
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub tax_rate: u32,
    pub discount: Option<String>,
    pub total: String,
    pub item_count: u32,
}

impl From<&CartSummary> for SummaryView {
    fn from(summary: &CartSummary) -> Self {
        Self {
            subtotal: summary.subtotal.to_string(),
            shipping: summary.shipping.to_string(),
            tax: summary.tax.to_string(),
            tax_rate: TAX_RATE_PERCENT,
            discount: (!summary.discount.is_zero()).then(|| summary.discount.to_string()),
            total: summary.total.to_string(),
            item_count: summary.item_count,
        }
    }
}

/// A shipping method radio button.
#[derive(Debug, Clone)]
pub struct ShippingOption {
    pub value: &'static str,
    pub label: &'static str,
    pub fee: String,
    pub selected: bool,
}

/// Applied coupon display data.
#[derive(Debug, Clone)]
pub struct CouponView {
    pub code: String,
    pub description: String,
}

/// Everything the cart and checkout pages render.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub summary: SummaryView,
    pub coupon: Option<CouponView>,
    pub shipping: Vec<ShippingOption>,
    pub shipping_label: &'static str,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items.iter().map(CartItemView::from).collect(),
            summary: SummaryView::from(&cart.summary()),
            coupon: cart.coupon.as_ref().map(|coupon| CouponView {
                code: coupon.code.clone(),
                description: coupon.describe(),
            }),
            shipping: ShippingMethod::ALL
                .iter()
                .map(|method| ShippingOption {
                    value: method.as_str(),
                    label: method.label(),
                    fee: method.fee().to_string(),
                    selected: *method == cart.shipping,
                })
                .collect(),
            shipping_label: cart.shipping.label(),
        }
    }
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub quantity: Option<String>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub quantity: String,
}

/// Form naming a single cart line.
#[derive(Debug, Deserialize)]
pub struct LineForm {
    pub product_id: String,
}

/// Clear cart form data.
#[derive(Debug, Default, Deserialize)]
pub struct ClearCartForm {
    #[serde(default)]
    pub confirm: Option<String>,
}

/// Coupon form data.
#[derive(Debug, Default, Deserialize)]
pub struct CouponForm {
    #[serde(default)]
    pub code: String,
}

/// Shipping method form data.
#[derive(Debug, Deserialize)]
pub struct ShippingForm {
    pub method: String,
}

fn parse_product_id(raw: &str) -> Result<ProductId> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid product id: {raw}")))
}

/// Parse a submitted quantity. Anything below 1 becomes 0, which the cart
/// treats as "leave unchanged".
fn parse_quantity(raw: &str) -> Result<u32> {
    let quantity: i64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid quantity: {raw}")))?;
    Ok(u32::try_from(quantity.max(0)).unwrap_or(u32::MAX))
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub layout: Layout,
    pub cart: CartView,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Checkout review page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/checkout.html")]
pub struct CheckoutTemplate {
    pub layout: Layout,
    pub cart: CartView,
}

// =============================================================================
// Helpers
// =============================================================================

async fn current_cart(state: &AppState, session: &Session) -> Result<Cart> {
    Ok(load_cart(session, state.config().seed_demo_cart).await?)
}

/// Store the cart and answer with either the badge fragment or a redirect.
async fn respond(
    session: &Session,
    headers: &HeaderMap,
    cart: &Cart,
    flash: Option<Flash>,
) -> Result<Response> {
    save_cart(session, cart).await?;

    if wants_fragment(headers) {
        return Ok((
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartCountTemplate {
                count: cart.item_count(),
            },
        )
            .into_response());
    }

    if let Some(flash) = flash {
        set_flash(session, flash).await?;
    }
    Ok(Redirect::to("/cart").into_response())
}

/// Turn a refused cart operation into a flash notice on the cart page.
///
/// Fragment requests get the error status instead.
async fn refuse(session: &Session, headers: &HeaderMap, err: CartError) -> Result<Response> {
    if wants_fragment(headers) {
        return Err(err.into());
    }
    let message = AppError::from(err).public_message();
    set_flash(session, Flash::error(message)).await?;
    Ok(Redirect::to("/cart").into_response())
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(state, session, layout))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    layout: Layout,
) -> Result<impl IntoResponse> {
    let cart = current_cart(&state, &session).await?;
    Ok(CartShowTemplate {
        layout,
        cart: CartView::from(&cart),
    })
}

/// Add a product to the cart.
#[instrument(skip(state, session, headers))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let id = parse_product_id(&form.product_id)?;
    let quantity = form
        .quantity
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(parse_quantity)
        .transpose()?
        .unwrap_or(1);
    let product = catalog::product(id).ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let mut cart = current_cart(&state, &session).await?;
    match cart.add(product, quantity) {
        Ok(line_quantity) => {
            let product_id = id.to_string();
            add_breadcrumb(
                "cart",
                "Added to cart",
                Some(&[("product_id", product_id.as_str())]),
            );
            tracing::info!(product_id = %id, line_quantity, "Added to cart");
            let flash = Flash::success(format!("{} added to cart!", product.name));
            respond(&session, &headers, &cart, Some(flash)).await
        }
        Err(err) => refuse(&session, &headers, err).await,
    }
}

/// Set a line's quantity.
#[instrument(skip(state, session, headers))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let id = parse_product_id(&form.product_id)?;
    let quantity = parse_quantity(&form.quantity)?;
    let mut cart = current_cart(&state, &session).await?;
    match cart.set_quantity(id, quantity) {
        Ok(change) => {
            log_change(id, change);
            respond(&session, &headers, &cart, None).await
        }
        Err(err) => refuse(&session, &headers, err).await,
    }
}

/// Add one unit to a line.
#[instrument(skip(state, session, headers))]
pub async fn increment(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<LineForm>,
) -> Result<Response> {
    let id = parse_product_id(&form.product_id)?;
    let mut cart = current_cart(&state, &session).await?;
    match cart.increment(id) {
        Ok(change) => {
            log_change(id, change);
            respond(&session, &headers, &cart, None).await
        }
        Err(err) => refuse(&session, &headers, err).await,
    }
}

/// Remove one unit from a line.
#[instrument(skip(state, session, headers))]
pub async fn decrement(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<LineForm>,
) -> Result<Response> {
    let id = parse_product_id(&form.product_id)?;
    let mut cart = current_cart(&state, &session).await?;
    match cart.decrement(id) {
        Ok(change) => {
            log_change(id, change);
            respond(&session, &headers, &cart, None).await
        }
        Err(err) => refuse(&session, &headers, err).await,
    }
}

fn log_change(id: ProductId, change: QuantityChange) {
    match change {
        QuantityChange::Updated(quantity) => {
            tracing::debug!(product_id = %id, quantity, "Cart quantity changed");
        }
        QuantityChange::Unchanged => {
            tracing::debug!(product_id = %id, "Cart quantity left unchanged");
        }
    }
}

/// Remove a line from the cart.
#[instrument(skip(state, session, headers))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<LineForm>,
) -> Result<Response> {
    let id = parse_product_id(&form.product_id)?;
    let mut cart = current_cart(&state, &session).await?;
    if !cart.remove(id) {
        return refuse(&session, &headers, CartError::UnknownItem(id)).await;
    }
    respond(&session, &headers, &cart, Some(Flash::success("Item removed from cart"))).await
}

/// Empty the cart. Requires `confirm=true`.
#[instrument(skip(state, session, headers))]
pub async fn clear(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<ClearCartForm>,
) -> Result<Response> {
    let confirmed = form.confirm.as_deref() == Some("true");
    let mut cart = current_cart(&state, &session).await?;
    match cart.clear(confirmed) {
        Ok(()) => respond(&session, &headers, &cart, Some(Flash::success("Cart cleared"))).await,
        Err(err) => refuse(&session, &headers, err).await,
    }
}

/// Apply a coupon code.
#[instrument(skip(state, session, headers))]
pub async fn apply_coupon(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<CouponForm>,
) -> Result<Response> {
    let mut cart = current_cart(&state, &session).await?;
    let code = match cart.apply_coupon(&form.code) {
        Ok(coupon) => coupon.code.clone(),
        Err(err) => return refuse(&session, &headers, err).await,
    };
    tracing::info!(coupon = %code, "Coupon applied");
    let flash = Flash::success(format!("Coupon {code} applied successfully!"));
    respond(&session, &headers, &cart, Some(flash)).await
}

/// Remove the applied coupon.
#[instrument(skip(state, session, headers))]
pub async fn remove_coupon(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<Response> {
    let mut cart = current_cart(&state, &session).await?;
    let flash = cart
        .remove_coupon()
        .map(|_| Flash::success("Coupon removed"));
    respond(&session, &headers, &cart, flash).await
}

/// Select the shipping method.
#[instrument(skip(state, session, headers))]
pub async fn set_shipping(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<ShippingForm>,
) -> Result<Response> {
    let method: ShippingMethod = form
        .method
        .parse()
        .map_err(|err: UnknownShippingMethod| AppError::BadRequest(err.to_string()))?;
    let mut cart = current_cart(&state, &session).await?;
    cart.set_shipping(method);
    respond(&session, &headers, &cart, None).await
}

/// Cart count badge fragment.
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let cart = current_cart(&state, &session).await?;
    Ok(CartCountTemplate {
        count: cart.item_count(),
    })
}

/// Start checkout: refuse an empty cart, otherwise go to the review page.
#[instrument(skip(state, session))]
pub async fn begin_checkout(State(state): State<AppState>, session: Session) -> Result<Response> {
    let cart = current_cart(&state, &session).await?;
    match cart.checkout() {
        Ok(summary) => {
            tracing::info!(
                items = summary.item_count,
                total = %summary.total,
                "Checkout started"
            );
            Ok(Redirect::to("/checkout").into_response())
        }
        Err(err) => {
            let message = AppError::from(err).public_message();
            set_flash(&session, Flash::error(message)).await?;
            Ok(Redirect::to("/cart").into_response())
        }
    }
}

/// Order review page. No payment is taken.
#[instrument(skip(state, session, layout))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    layout: Layout,
) -> Result<Response> {
    let cart = current_cart(&state, &session).await?;
    if let Err(err) = cart.checkout() {
        let message = AppError::from(err).public_message();
        set_flash(&session, Flash::error(message)).await?;
        return Ok(Redirect::to("/cart").into_response());
    }
    Ok(CheckoutTemplate {
        layout,
        cart: CartView::from(&cart),
    }
    .into_response())
}

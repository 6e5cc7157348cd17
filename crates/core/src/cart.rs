//! Cart line items, coupons and the derived order summary.
//!
//! A [`Cart`] is plain data: it is serialized into the visitor's session by
//! the storefront and never shared between visitors. The summary is
//! recomputed from scratch on every call to [`Cart::summary`].

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{self, Category, Product};
use crate::types::{Price, ProductId};

/// Sales tax applied to the subtotal, in percent.
pub const TAX_RATE_PERCENT: u32 = 17;

/// Errors raised by cart operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Checkout attempted with no line items.
    #[error("your cart is empty")]
    EmptyCart,
    /// Coupon submitted with a blank code.
    #[error("please enter a coupon code")]
    EmptyCouponCode,
    /// Coupon code not in the coupon table.
    #[error("invalid coupon code: {0}")]
    InvalidCoupon(String),
    /// Clearing the cart was not confirmed.
    #[error("clearing the cart requires confirmation")]
    ConfirmationRequired,
    /// Product is flagged out of stock.
    #[error("product {0} is out of stock")]
    OutOfStock(ProductId),
    /// No line item or catalog product with this id.
    #[error("no such item: {0}")]
    UnknownItem(ProductId),
}

/// How a coupon's magnitude is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type", content = "value")]
pub enum CouponKind {
    /// Percentage of the subtotal.
    Percentage(u32),
    /// Fixed amount in whole rupees.
    Fixed(i64),
}

/// A named discount rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    pub code: String,
    pub kind: CouponKind,
}

impl Coupon {
    /// Discount this coupon grants on `subtotal`, before capping.
    #[must_use]
    pub fn discount_on(&self, subtotal: Price) -> Price {
        match self.kind {
            CouponKind::Percentage(percent) => subtotal.percent(Decimal::from(percent)),
            CouponKind::Fixed(amount) => Price::from_whole(amount),
        }
    }

    /// Short description, e.g. `10% off` or `Rs. 200 off`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.kind {
            CouponKind::Percentage(percent) => format!("{percent}% off"),
            CouponKind::Fixed(amount) => format!("{} off", Price::from_whole(amount)),
        }
    }
}

/// Coupon table: code, kind.
const COUPON_TABLE: [(&str, CouponKind); 3] = [
    ("SAVE10", CouponKind::Percentage(10)),
    ("SAVE200", CouponKind::Fixed(200)),
    ("WELCOME15", CouponKind::Percentage(15)),
];

/// All coupons currently on offer.
#[must_use]
pub fn coupons() -> Vec<Coupon> {
    COUPON_TABLE
        .iter()
        .map(|(code, kind)| Coupon {
            code: (*code).to_owned(),
            kind: *kind,
        })
        .collect()
}

/// Look up a coupon by code. Surrounding whitespace and case are ignored.
#[must_use]
pub fn find_coupon(code: &str) -> Option<Coupon> {
    let code = code.trim();
    COUPON_TABLE
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(code))
        .map(|(known, kind)| Coupon {
            code: (*known).to_owned(),
            kind: *kind,
        })
}

/// Delivery option with a flat fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    #[default]
    Standard,
    Express,
}

impl ShippingMethod {
    pub const ALL: [Self; 2] = [Self::Standard, Self::Express];

    /// Flat shipping fee.
    #[must_use]
    pub fn fee(&self) -> Price {
        match self {
            Self::Standard => Price::from_whole(150),
            Self::Express => Price::from_whole(300),
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Express => "express",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Standard => "Standard Delivery (3-5 days)",
            Self::Express => "Express Delivery (1-2 days)",
        }
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unknown shipping method.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown shipping method: {0}")]
pub struct UnknownShippingMethod(pub String);

impl FromStr for ShippingMethod {
    type Err = UnknownShippingMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownShippingMethod(s.to_owned()))
    }
}

/// A product plus a quantity held in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub original_price: Option<Price>,
    pub image: String,
    pub description: String,
    pub category: Category,
    pub in_stock: bool,
    /// Always within `1..=max_quantity`.
    pub quantity: u32,
    pub max_quantity: u32,
}

impl CartLineItem {
    fn from_product(product: &Product, quantity: u32) -> Self {
        let max_quantity = product.max_per_order.max(1);
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            original_price: product.original_price,
            image: product.image.clone(),
            description: product.description.clone(),
            category: product.category,
            in_stock: product.in_stock,
            quantity: quantity.clamp(1, max_quantity),
            max_quantity,
        }
    }

    /// `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }

    #[must_use]
    pub const fn can_increment(&self) -> bool {
        self.quantity < self.max_quantity
    }

    #[must_use]
    pub const fn can_decrement(&self) -> bool {
        self.quantity > 1
    }
}

/// Result of a quantity change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The quantity is now the contained value.
    Updated(u32),
    /// The request was out of bounds or already satisfied.
    Unchanged,
}

/// Derived financial breakdown of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub subtotal: Price,
    pub shipping: Price,
    pub tax: Price,
    pub discount: Price,
    pub total: Price,
    pub item_count: u32,
}

/// The visitor's shopping cart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartLineItem>,
    pub coupon: Option<Coupon>,
    pub shipping: ShippingMethod,
}

impl Cart {
    /// An empty cart with standard shipping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The three-line demo cart shown to first-time visitors when demo
    /// seeding is enabled.
    #[must_use]
    pub fn demo() -> Self {
        let mut cart = Self::new();
        for (id, quantity) in [(1, 2), (2, 1), (3, 3)] {
            if let Some(product) = catalog::product(ProductId::new(id)) {
                cart.items.push(CartLineItem::from_product(product, quantity));
            }
        }
        cart
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.product_id == id)
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLineItem> {
        self.items.iter_mut().find(|item| item.product_id == id)
    }

    /// Add `quantity` units of `product`.
    ///
    /// A new product gets its own line; an existing line is incremented.
    /// Either way the line is clamped to the product's per-order maximum.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::OutOfStock`] for products flagged out of stock.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<u32, CartError> {
        if !product.in_stock {
            return Err(CartError::OutOfStock(product.id));
        }
        let quantity = quantity.max(1);
        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(quantity).min(line.max_quantity);
            return Ok(line.quantity);
        }
        let line = CartLineItem::from_product(product, quantity);
        let added = line.quantity;
        self.items.push(line);
        Ok(added)
    }

    /// Set a line's quantity. Values below 1 are ignored; values above the
    /// line's maximum are clamped.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownItem`] if the product is not in the cart.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) -> Result<QuantityChange, CartError> {
        let line = self.line_mut(id).ok_or(CartError::UnknownItem(id))?;
        if quantity < 1 {
            return Ok(QuantityChange::Unchanged);
        }
        let clamped = quantity.min(line.max_quantity);
        if clamped == line.quantity {
            return Ok(QuantityChange::Unchanged);
        }
        line.quantity = clamped;
        Ok(QuantityChange::Updated(clamped))
    }

    /// Add one unit. A no-op at the line's maximum.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownItem`] if the product is not in the cart.
    pub fn increment(&mut self, id: ProductId) -> Result<QuantityChange, CartError> {
        let line = self.line(id).ok_or(CartError::UnknownItem(id))?;
        if !line.can_increment() {
            return Ok(QuantityChange::Unchanged);
        }
        let next = line.quantity + 1;
        self.set_quantity(id, next)
    }

    /// Remove one unit. A no-op at quantity 1.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownItem`] if the product is not in the cart.
    pub fn decrement(&mut self, id: ProductId) -> Result<QuantityChange, CartError> {
        let line = self.line(id).ok_or(CartError::UnknownItem(id))?;
        let next = line.quantity.saturating_sub(1);
        self.set_quantity(id, next)
    }

    /// Delete a line. Returns whether anything was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product_id != id);
        self.items.len() != before
    }

    /// Empty the cart and drop any coupon.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ConfirmationRequired`] unless `confirmed`.
    pub fn clear(&mut self, confirmed: bool) -> Result<(), CartError> {
        if !confirmed {
            return Err(CartError::ConfirmationRequired);
        }
        self.items.clear();
        self.coupon = None;
        Ok(())
    }

    /// Apply a coupon code, replacing any coupon already applied.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptyCouponCode`] for blank input and
    /// [`CartError::InvalidCoupon`] for unknown codes. The cart is left
    /// untouched on error.
    pub fn apply_coupon(&mut self, code: &str) -> Result<&Coupon, CartError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(CartError::EmptyCouponCode);
        }
        let coupon = find_coupon(code).ok_or_else(|| CartError::InvalidCoupon(code.to_owned()))?;
        Ok(&*self.coupon.insert(coupon))
    }

    /// Drop the applied coupon, returning it.
    pub fn remove_coupon(&mut self) -> Option<Coupon> {
        self.coupon.take()
    }

    pub fn set_shipping(&mut self, method: ShippingMethod) {
        self.shipping = method;
    }

    /// Compute the order summary from the current state.
    ///
    /// The discount is capped at subtotal + shipping + tax so the total never
    /// goes negative.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        let subtotal = self
            .items
            .iter()
            .map(CartLineItem::line_total)
            .fold(Price::zero(), Price::plus);
        let shipping = self.shipping.fee();
        let tax = subtotal.percent(Decimal::from(TAX_RATE_PERCENT));
        let gross = subtotal.plus(shipping).plus(tax);
        let discount = self
            .coupon
            .as_ref()
            .map_or_else(Price::zero, |coupon| coupon.discount_on(subtotal))
            .min(gross);
        let total = gross.saturating_sub(discount);

        CartSummary {
            subtotal,
            shipping,
            tax,
            discount,
            total,
            item_count: self.item_count(),
        }
    }

    /// Validate the cart for checkout and return the summary to carry over.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptyCart`] if there is nothing to buy.
    pub fn checkout(&self) -> Result<CartSummary, CartError> {
        if self.is_empty() {
            return Err(CartError::EmptyCart);
        }
        Ok(self.summary())
    }
}

//! Catalog query commands.
//!
//! # Usage
//!
//! ```bash
//! # First page of the grid listing
//! hs-cli catalog list
//!
//! # Supplements under Rs. 2,000, cheapest first
//! hs-cli catalog list --category supplements --max-price 2000 --sort price-low
//!
//! # Coupons on offer
//! hs-cli catalog coupons
//! ```

use hafiz_sajid_core::cart::coupons as coupon_table;
use hafiz_sajid_core::catalog::{self, UnknownCategory};
use hafiz_sajid_core::query::{
    CategoryFilter, FilterState, PriceRange, SortKey, UnknownSortKey, ViewMode, filter_and_sort,
    paginate,
};
use thiserror::Error;

/// Errors that can occur while building a catalog query.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Category(#[from] UnknownCategory),

    #[error(transparent)]
    Sort(#[from] UnknownSortKey),

    /// Minimum rating outside 0 to 5.
    #[error("Rating must be between 0 and 5, got {0}")]
    InvalidRating(f32),
}

/// Listing options, mirroring the storefront's query string.
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub category: String,
    pub min_price: i64,
    pub max_price: i64,
    pub rating: Option<f32>,
    pub in_stock: bool,
    pub sort: String,
    pub search: String,
    pub page: usize,
    pub list_view: bool,
}

impl ListOptions {
    /// Translate the options into a filter state.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown category or sort key, or a rating
    /// outside 0 to 5.
    pub fn filters(&self) -> Result<FilterState, CatalogError> {
        let category: CategoryFilter = self.category.parse()?;
        let sort: SortKey = self.sort.parse()?;
        if let Some(rating) = self.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(CatalogError::InvalidRating(rating));
            }
        }

        let (min, max) = if self.min_price > self.max_price {
            (self.max_price, self.min_price)
        } else {
            (self.min_price, self.max_price)
        };

        Ok(FilterState {
            category,
            price_range: PriceRange::new(min.max(0), max.max(0)),
            min_rating: self.rating.filter(|rating| *rating > 0.0),
            in_stock_only: self.in_stock,
            sort,
            search: self.search.trim().to_owned(),
        })
    }

    const fn view(&self) -> ViewMode {
        if self.list_view {
            ViewMode::List
        } else {
            ViewMode::Grid
        }
    }
}

/// Log one page of the filtered and sorted catalog.
///
/// # Errors
///
/// Returns an error if the options do not describe a valid query.
pub fn list(options: &ListOptions) -> Result<usize, CatalogError> {
    let filters = options.filters()?;
    let matching = filter_and_sort(catalog::products(), &filters);
    let page = paginate(&matching, options.page, options.view().page_size());

    tracing::info!(
        "Page {} of {} ({} matching, sorted by {})",
        page.page,
        page.total_pages.max(1),
        page.total_items,
        filters.sort.label()
    );
    if page.items.is_empty() {
        tracing::info!("No products match these filters");
    }
    for product in &page.items {
        let stock = if product.in_stock { "in stock" } else { "out of stock" };
        tracing::info!(
            "  #{:<3} {:<24} {:<12} {:>12}  {:.1}★ ({} reviews, {})",
            product.id,
            product.name,
            product.category.name(),
            product.price.to_string(),
            product.rating,
            product.reviews,
            stock
        );
    }

    Ok(page.items.len())
}

/// Log every coupon code with its discount.
pub fn coupons() {
    for coupon in coupon_table() {
        tracing::info!("  {:<10} {}", coupon.code, coupon.describe());
    }
}

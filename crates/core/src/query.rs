//! Catalog filter, sort and paginate engine.
//!
//! Given the immutable product list and a [`FilterState`], the engine
//! produces the ordered set of matching products. [`paginate`] then slices
//! that set into fixed-size pages. Everything here is a pure function over
//! its inputs; resetting the page when filters change is handled by
//! [`ListingState`].
//!
//! ```
//! use hafiz_sajid_core::catalog::products;
//! use hafiz_sajid_core::query::{FilterState, SortKey, filter_and_sort, paginate};
//!
//! let filters = FilterState { sort: SortKey::PriceLow, ..FilterState::default() };
//! let matching = filter_and_sort(products(), &filters);
//! let page = paginate(&matching, 1, 4);
//! assert_eq!(page.items.len(), 4);
//! assert_eq!(page.total_pages, 2);
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Product};

/// Upper bound of the default price range.
pub const DEFAULT_MAX_PRICE: i64 = 5000;

/// Category selection: everything, or exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Identifier used in URLs (`all` or a category id).
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.id(),
        }
    }

    /// Whether `product` passes this filter.
    #[must_use]
    pub fn admits(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => product.category == *category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = crate::catalog::UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") || s.trim().is_empty() {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// Inclusive price range in whole rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
}

impl PriceRange {
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Whether `amount` lies within `[min, max]`.
    #[must_use]
    pub const fn contains(&self, amount: i64) -> bool {
        amount >= self.min && amount <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(0, DEFAULT_MAX_PRICE)
    }
}

/// A labelled price range offered as a one-click filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricePreset {
    pub range: PriceRange,
    pub label: &'static str,
}

/// One-click price ranges.
pub const PRICE_PRESETS: [PricePreset; 4] = [
    PricePreset {
        range: PriceRange::new(0, 1000),
        label: "Under Rs. 1,000",
    },
    PricePreset {
        range: PriceRange::new(1000, 2000),
        label: "Rs. 1,000 - Rs. 2,000",
    },
    PricePreset {
        range: PriceRange::new(2000, 3000),
        label: "Rs. 2,000 - Rs. 3,000",
    },
    PricePreset {
        range: PriceRange::new(3000, 5000),
        label: "Above Rs. 3,000",
    },
];

/// Sort order for the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Most reviews first.
    #[default]
    Popular,
    /// Highest id first.
    Newest,
    PriceLow,
    PriceHigh,
    /// Best rated first.
    Rating,
}

impl SortKey {
    pub const ALL: [Self; 5] = [
        Self::Popular,
        Self::Newest,
        Self::PriceLow,
        Self::PriceHigh,
        Self::Rating,
    ];

    /// Wire name used in query strings.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::Newest => "newest",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Rating => "rating",
        }
    }

    /// Label for the sort dropdown.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Popular => "Most Popular",
            Self::Newest => "Newest First",
            Self::PriceLow => "Price: Low to High",
            Self::PriceHigh => "Price: High to Low",
            Self::Rating => "Highest Rated",
        }
    }

    /// Compare two products under this key.
    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Popular => b.reviews.cmp(&a.reviews),
            Self::Newest => b.id.cmp(&a.id),
            Self::PriceLow => a.price.whole_units().cmp(&b.price.whole_units()),
            Self::PriceHigh => b.price.whole_units().cmp(&a.price.whole_units()),
            Self::Rating => b.rating.total_cmp(&a.rating),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unknown sort key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key: {0}")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s.trim())
            .ok_or_else(|| UnknownSortKey(s.to_owned()))
    }
}

/// Listing layout. Determines the page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    /// Products per page for this layout.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        match self {
            Self::Grid => 12,
            Self::List => 8,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }
}

/// User-selected predicates and sort key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub price_range: PriceRange,
    /// Minimum rating, inclusive. `None` disables the rating filter.
    pub min_rating: Option<f32>,
    pub in_stock_only: bool,
    pub sort: SortKey,
    /// Free-text query. Blank disables the text filter.
    pub search: String,
}

impl FilterState {
    /// The state produced by "clear all": every predicate off, price range
    /// widened to the most expensive product.
    #[must_use]
    pub fn cleared(max_price: i64) -> Self {
        Self {
            price_range: PriceRange::new(0, max_price),
            ..Self::default()
        }
    }

    /// Whether `product` satisfies every active predicate.
    #[must_use]
    pub fn admits(&self, product: &Product) -> bool {
        if !self.category.admits(product) {
            return false;
        }
        if !self.price_range.contains(product.price.whole_units()) {
            return false;
        }
        if let Some(threshold) = self.min_rating {
            if product.rating < threshold {
                return false;
            }
        }
        if self.in_stock_only && !product.in_stock {
            return false;
        }
        let needle = self.search.trim().to_lowercase();
        needle.is_empty() || product.matches_text(&needle)
    }

    /// Number of predicates narrowing the listing. Sorting is not counted.
    #[must_use]
    pub fn active_filter_count(&self, max_price: i64) -> usize {
        [
            self.category != CategoryFilter::All,
            self.price_range.min > 0 || self.price_range.max < max_price,
            self.min_rating.is_some(),
            self.in_stock_only,
            !self.search.trim().is_empty(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

/// Apply every predicate in `filters` and sort the survivors.
///
/// The sort is stable: products with equal keys keep their catalog order.
#[must_use]
pub fn filter_and_sort<'a>(products: &'a [Product], filters: &FilterState) -> Vec<&'a Product> {
    let mut matching: Vec<&Product> = products
        .iter()
        .filter(|product| filters.admits(product))
        .collect();
    matching.sort_by(|a, b| filters.sort.compare(a, b));
    matching
}

/// Lowest and highest whole-rupee price in `products`.
#[must_use]
pub fn price_bounds(products: &[Product]) -> Option<(i64, i64)> {
    let prices = products.iter().map(|p| p.price.whole_units());
    let min = prices.clone().min()?;
    let max = prices.max()?;
    Some((min, max))
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Page actually returned, after clamping. Always at least 1.
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Transform the items while keeping the paging metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Slice `items` into pages of `page_size` and return page `page`.
///
/// Page numbers are 1-based. `0` becomes `1`, and anything past the last
/// page becomes the last page. An empty input yields page 1 of 0.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);
    let page = page.clamp(1, total_pages.max(1));

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_items);
    let items = items.get(start..end).map(<[T]>::to_vec).unwrap_or_default();

    Page {
        items,
        page,
        page_size,
        total_items,
        total_pages,
    }
}

/// Filters plus the current page, as held by a listing view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListingState {
    pub filters: FilterState,
    pub page: usize,
}

impl ListingState {
    #[must_use]
    pub fn new(filters: FilterState) -> Self {
        Self { filters, page: 1 }
    }

    /// Replace the filters. Any actual change sends the listing back to page 1.
    pub fn apply_filters(&mut self, filters: FilterState) {
        if filters != self.filters {
            self.filters = filters;
            self.page = 1;
        }
    }

    /// Move to another page without touching the filters.
    pub fn go_to(&mut self, page: usize) {
        self.page = page.max(1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::catalog::products;
    use crate::types::ProductId;

    fn ids(products: &[&Product]) -> Vec<i32> {
        products.iter().map(|p| p.id.as_i32()).collect()
    }

    fn prices(products: &[&Product]) -> Vec<i64> {
        products.iter().map(|p| p.price.whole_units()).collect()
    }

    #[test]
    fn test_default_sort_is_popularity() {
        let result = filter_and_sort(products(), &FilterState::default());
        // reviews: 203, 156, 128, 95, 89, 67
        assert_eq!(ids(&result), vec![4, 3, 1, 2, 6, 5]);
    }

    #[test]
    fn test_sort_price_low() {
        let filters = FilterState {
            sort: SortKey::PriceLow,
            ..FilterState::default()
        };
        let result = filter_and_sort(products(), &filters);
        assert_eq!(prices(&result), vec![599, 749, 899, 1299, 1499, 1899]);
    }

    #[test]
    fn test_sort_price_high_and_newest() {
        let filters = FilterState {
            sort: SortKey::PriceHigh,
            ..FilterState::default()
        };
        assert_eq!(
            prices(&filter_and_sort(products(), &filters)),
            vec![1899, 1499, 1299, 899, 749, 599]
        );

        let filters = FilterState {
            sort: SortKey::Newest,
            ..FilterState::default()
        };
        assert_eq!(
            ids(&filter_and_sort(products(), &filters)),
            vec![6, 5, 4, 3, 2, 1]
        );
    }

    #[test]
    fn test_rating_sort_is_stable_on_ties() {
        let filters = FilterState {
            sort: SortKey::Rating,
            ..FilterState::default()
        };
        let result = filter_and_sort(products(), &filters);
        // Products 1 and 6 both rate 4.8 and keep catalog order.
        assert_eq!(ids(&result), vec![4, 1, 6, 3, 2, 5]);
    }

    #[test]
    fn test_category_filter() {
        let filters = FilterState {
            category: CategoryFilter::Only(Category::Supplements),
            ..FilterState::default()
        };
        let result = filter_and_sort(products(), &filters);
        assert_eq!(ids(&result), vec![4, 3, 1]);
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let filters = FilterState {
            price_range: PriceRange::new(749, 1299),
            sort: SortKey::PriceLow,
            ..FilterState::default()
        };
        let result = filter_and_sort(products(), &filters);
        assert_eq!(prices(&result), vec![749, 899, 1299]);
    }

    #[test]
    fn test_rating_threshold() {
        let filters = FilterState {
            min_rating: Some(4.8),
            sort: SortKey::Newest,
            ..FilterState::default()
        };
        let result = filter_and_sort(products(), &filters);
        assert_eq!(ids(&result), vec![6, 4, 1]);
    }

    #[test]
    fn test_text_search_unions_fields() {
        let by_category = FilterState {
            search: "VACCINES".to_string(),
            ..FilterState::default()
        };
        assert_eq!(ids(&filter_and_sort(products(), &by_category)), vec![6]);

        let by_description = FilterState {
            search: "  stress ".to_string(),
            ..FilterState::default()
        };
        assert_eq!(ids(&filter_and_sort(products(), &by_description)), vec![3]);
    }

    #[test]
    fn test_count_equals_conjunction_of_predicates() {
        let filters = FilterState {
            category: CategoryFilter::Only(Category::Supplements),
            price_range: PriceRange::new(0, 1300),
            min_rating: Some(4.7),
            in_stock_only: true,
            search: "r".to_string(),
            sort: SortKey::Popular,
        };
        let expected = products()
            .iter()
            .filter(|p| {
                p.category == Category::Supplements
                    && p.price.whole_units() <= 1300
                    && p.rating >= 4.7
                    && p.in_stock
                    && p.matches_text("r")
            })
            .count();
        assert_eq!(filter_and_sort(products(), &filters).len(), expected);
        assert_eq!(expected, 2);
    }

    #[test]
    fn test_no_matches_is_an_empty_page() {
        let filters = FilterState {
            search: "tractor".to_string(),
            ..FilterState::default()
        };
        let result = filter_and_sort(products(), &filters);
        let page = paginate(&result, 3, 12);
        assert!(page.items.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_paginate_six_by_four() {
        let all = filter_and_sort(products(), &FilterState::default());
        let first = paginate(&all, 1, 4);
        assert_eq!(first.items.len(), 4);
        assert_eq!(first.total_pages, 2);
        assert!(first.has_next());

        let second = paginate(&all, 2, 4);
        assert_eq!(second.items.len(), 2);
        assert!(!second.has_next());
        assert!(second.has_previous());

        let third = paginate(&all, 3, 4);
        assert_eq!(third.page, 2);
        assert_eq!(third.items, second.items);
    }

    #[test]
    fn test_paginate_zero_page_clamps_to_first() {
        let all = filter_and_sort(products(), &FilterState::default());
        assert_eq!(paginate(&all, 0, 4).page, 1);
    }

    #[test]
    fn test_view_mode_page_sizes() {
        assert_eq!(ViewMode::Grid.page_size(), 12);
        assert_eq!(ViewMode::List.page_size(), 8);
    }

    #[test]
    fn test_listing_resets_page_on_filter_change() {
        let mut listing = ListingState::new(FilterState::default());
        listing.go_to(2);
        listing.apply_filters(FilterState::default());
        assert_eq!(listing.page, 2, "identical filters keep the page");

        listing.apply_filters(FilterState {
            in_stock_only: true,
            ..FilterState::default()
        });
        assert_eq!(listing.page, 1);
    }

    #[test]
    fn test_active_filter_count() {
        let (_, max) = price_bounds(products()).unwrap();
        assert_eq!(max, 1899);
        assert_eq!(FilterState::cleared(max).active_filter_count(max), 0);

        let filters = FilterState {
            category: CategoryFilter::Only(Category::Vitamins),
            price_range: PriceRange::new(0, 1000),
            min_rating: Some(4.0),
            in_stock_only: true,
            search: "gold".to_string(),
            sort: SortKey::Rating,
        };
        assert_eq!(filters.active_filter_count(max), 5);
    }

    #[test]
    fn test_parse_sort_and_category() {
        assert_eq!("price-low".parse::<SortKey>().unwrap(), SortKey::PriceLow);
        assert!("cheapest".parse::<SortKey>().is_err());
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "vaccines".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Vaccines)
        );
    }

    #[test]
    fn test_page_map_keeps_metadata() {
        let all = filter_and_sort(products(), &FilterState::default());
        let page = paginate(&all, 2, 4).map(|p| p.id);
        assert_eq!(page.items, vec![ProductId::new(6), ProductId::new(5)]);
        assert_eq!(page.total_items, 6);
    }
}

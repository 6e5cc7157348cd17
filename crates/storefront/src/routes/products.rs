//! Product route handlers.
//!
//! The listing's filters travel in the query string so every page is
//! linkable. The last filter set is also kept in the session: when a request
//! arrives with different filters, the listing goes back to page 1 whatever
//! page number it asked for.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query},
    response::IntoResponse,
};
use hafiz_sajid_core::ProductId;
use hafiz_sajid_core::catalog::{self, CATEGORIES, Product};
use hafiz_sajid_core::query::{
    CategoryFilter, FilterState, PRICE_PRESETS, PriceRange, SortKey, ViewMode, filter_and_sort,
    paginate, price_bounds,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::layout::Layout;
use crate::models::{load_listing, save_listing};

/// Minimum-rating choices offered by the sidebar.
pub const RATING_CHOICES: [u8; 4] = [4, 3, 2, 1];

// =============================================================================
// Views
// =============================================================================

/// Product display data for templates.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub original_price: Option<String>,
    pub discount_percent: Option<u32>,
    pub image: String,
    pub description: String,
    pub category_name: &'static str,
    pub category_icon: &'static str,
    pub rating: String,
    pub reviews: u32,
    pub in_stock: bool,
    pub max_per_order: u32,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            price: product.price.to_string(),
            original_price: product.original_price.map(|price| price.to_string()),
            discount_percent: product.discount_percent(),
            image: product.image.clone(),
            description: product.description.clone(),
            category_name: product.category.name(),
            category_icon: product.category.icon(),
            rating: format!("{:.1}", product.rating),
            reviews: product.reviews,
            in_stock: product.in_stock,
            max_per_order: product.max_per_order,
        }
    }
}

/// A link in the filter sidebar or toolbar.
#[derive(Debug, Clone)]
pub struct FilterLink {
    pub label: String,
    pub icon: &'static str,
    pub href: String,
    pub active: bool,
    /// Number of products in the category, when relevant.
    pub count: Option<usize>,
}

/// An entry in the sort dropdown.
#[derive(Debug, Clone)]
pub struct SortOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// One slot in the pager. A gap has no link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlot {
    pub label: String,
    pub href: Option<String>,
    pub current: bool,
}

/// Pager numbers to show: the first and last page plus two either side of
/// the current one, with a gap marker where numbers are skipped.
#[must_use]
pub fn page_window(current: usize, total: usize) -> Vec<Option<usize>> {
    let mut slots = Vec::new();
    for page in 1..=total {
        if page == 1 || page == total || (page + 2 >= current && page <= current + 2) {
            slots.push(Some(page));
        } else if page + 3 == current || page == current + 3 {
            slots.push(None);
        }
    }
    slots
}

// =============================================================================
// Query Parsing
// =============================================================================

/// Listing query parameters.
///
/// Every field is a raw string so malformed values fall back to their
/// defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingQuery {
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub rating: Option<String>,
    pub in_stock: Option<String>,
    pub sort: Option<String>,
    pub q: Option<String>,
    pub page: Option<String>,
    pub view: Option<String>,
}

fn parse_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| matches!(v.trim(), "true" | "1" | "on" | "yes"))
}

impl ListingQuery {
    /// The filter state described by the query.
    #[must_use]
    pub fn filters(&self) -> FilterState {
        let defaults = PriceRange::default();
        let parse_price = |raw: Option<&String>, default: i64| {
            raw.and_then(|v| v.trim().parse::<i64>().ok())
                .filter(|v| *v >= 0)
                .unwrap_or(default)
        };
        let mut min = parse_price(self.min_price.as_ref(), defaults.min);
        let mut max = parse_price(self.max_price.as_ref(), defaults.max);
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }

        FilterState {
            category: self
                .category
                .as_deref()
                .and_then(|v| v.parse::<CategoryFilter>().ok())
                .unwrap_or_default(),
            price_range: PriceRange::new(min, max),
            min_rating: self
                .rating
                .as_deref()
                .and_then(|v| v.trim().parse::<f32>().ok())
                .filter(|v| (0.0..=5.0).contains(v) && *v > 0.0),
            in_stock_only: parse_flag(self.in_stock.as_deref()),
            sort: self
                .sort
                .as_deref()
                .and_then(|v| v.parse::<SortKey>().ok())
                .unwrap_or_default(),
            search: self.q.as_deref().unwrap_or_default().trim().to_string(),
        }
    }

    /// Requested page, 1 when absent or malformed.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(1)
            .max(1)
    }

    #[must_use]
    pub fn view(&self) -> ViewMode {
        match self.view.as_deref().map(str::trim) {
            Some("list") => ViewMode::List,
            _ => ViewMode::Grid,
        }
    }
}

/// Build a listing URL. Parameters at their default are omitted.
#[must_use]
pub fn listing_href(filters: &FilterState, view: ViewMode, page: usize) -> String {
    let defaults = PriceRange::default();
    let mut params: Vec<(&str, String)> = Vec::new();
    if filters.category != CategoryFilter::All {
        params.push(("category", filters.category.id().to_string()));
    }
    if filters.price_range.min != defaults.min {
        params.push(("min_price", filters.price_range.min.to_string()));
    }
    if filters.price_range.max != defaults.max {
        params.push(("max_price", filters.price_range.max.to_string()));
    }
    if let Some(rating) = filters.min_rating {
        params.push(("rating", rating.to_string()));
    }
    if filters.in_stock_only {
        params.push(("in_stock", "true".to_string()));
    }
    if filters.sort != SortKey::default() {
        params.push(("sort", filters.sort.as_str().to_string()));
    }
    if !filters.search.is_empty() {
        params.push(("q", filters.search.clone()));
    }
    if view != ViewMode::default() {
        params.push(("view", view.as_str().to_string()));
    }
    if page > 1 {
        params.push(("page", page.to_string()));
    }

    match serde_urlencoded::to_string(&params) {
        Ok(query) if !query.is_empty() => format!("/products?{query}"),
        _ => "/products".to_string(),
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub layout: Layout,
    pub products: Vec<ProductCardView>,
    pub list_view: bool,
    pub grid_href: String,
    pub list_href: String,
    pub categories: Vec<FilterLink>,
    pub price_presets: Vec<FilterLink>,
    pub ratings: Vec<FilterLink>,
    pub in_stock_href: String,
    pub sort_options: Vec<SortOption>,
    pub filters: FilterState,
    pub category_id: &'static str,
    pub active_filter_count: usize,
    pub clear_href: String,
    pub total_items: usize,
    pub page: usize,
    pub total_pages: usize,
    pub previous_href: Option<String>,
    pub next_href: Option<String>,
    pub pages: Vec<PageSlot>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub layout: Layout,
    pub product: ProductCardView,
    pub related_products: Vec<ProductCardView>,
}

/// Quick view fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/quick_view.html")]
pub struct QuickViewTemplate {
    pub product: ProductCardView,
}

// =============================================================================
// Handlers
// =============================================================================

type SidebarLinks = (Vec<FilterLink>, Vec<FilterLink>, Vec<FilterLink>);

/// Category, price preset and rating links for the sidebar.
fn sidebar_links(filters: &FilterState, view: ViewMode) -> SidebarLinks {
    let products = catalog::products();

    let categories = CATEGORIES
        .iter()
        .map(|info| {
            let category = info.id.parse::<CategoryFilter>().unwrap_or_default();
            let next = FilterState {
                category,
                ..filters.clone()
            };
            FilterLink {
                label: info.name.to_string(),
                icon: info.icon,
                href: listing_href(&next, view, 1),
                active: filters.category == category,
                count: match category {
                    CategoryFilter::All => None,
                    CategoryFilter::Only(_) => {
                        Some(products.iter().filter(|p| category.admits(p)).count())
                    }
                },
            }
        })
        .collect();

    let price_presets = PRICE_PRESETS
        .iter()
        .map(|preset| {
            let next = FilterState {
                price_range: preset.range,
                ..filters.clone()
            };
            FilterLink {
                label: preset.label.to_string(),
                icon: "",
                href: listing_href(&next, view, 1),
                active: filters.price_range == preset.range,
                count: None,
            }
        })
        .collect();

    let ratings = RATING_CHOICES
        .iter()
        .map(|stars| {
            let threshold = f32::from(*stars);
            let active = filters.min_rating == Some(threshold);
            // Clicking the active rating turns the filter off.
            let next = FilterState {
                min_rating: if active { None } else { Some(threshold) },
                ..filters.clone()
            };
            FilterLink {
                label: format!(
                    "{}{} & up",
                    "★".repeat(usize::from(*stars)),
                    "☆".repeat(usize::from(5 - stars))
                ),
                icon: "",
                href: listing_href(&next, view, 1),
                active,
                count: None,
            }
        })
        .collect();

    (categories, price_presets, ratings)
}

/// Display product listing page.
#[instrument(skip(session, layout))]
pub async fn index(
    session: Session,
    layout: Layout,
    Query(query): Query<ListingQuery>,
) -> Result<impl IntoResponse> {
    let view = query.view();
    let mut listing = load_listing(&session, FilterState::default()).await?;
    let filters = query.filters();

    if filters == listing.filters {
        listing.go_to(query.page());
    } else {
        listing.apply_filters(filters);
    }

    let matching = filter_and_sort(catalog::products(), &listing.filters);
    let page = paginate(&matching, listing.page, view.page_size());
    // Store the clamped page so "next" from the last page stays put.
    listing.go_to(page.page);
    save_listing(&session, &listing).await?;

    let filters = listing.filters;
    let (categories, price_presets, ratings) = sidebar_links(&filters, view);
    let in_stock_href = listing_href(
        &FilterState {
            in_stock_only: !filters.in_stock_only,
            ..filters.clone()
        },
        view,
        1,
    );
    let sort_options = SortKey::ALL
        .iter()
        .map(|key| SortOption {
            value: key.as_str(),
            label: key.label(),
            selected: *key == filters.sort,
        })
        .collect();
    let pages = page_window(page.page, page.total_pages)
        .into_iter()
        .map(|slot| match slot {
            Some(number) => PageSlot {
                label: number.to_string(),
                href: Some(listing_href(&filters, view, number)),
                current: number == page.page,
            },
            None => PageSlot {
                label: "…".to_string(),
                href: None,
                current: false,
            },
        })
        .collect();

    let max_price = catalog_max_price();
    Ok(ProductsIndexTemplate {
        layout,
        list_view: view == ViewMode::List,
        grid_href: listing_href(&filters, ViewMode::Grid, 1),
        list_href: listing_href(&filters, ViewMode::List, 1),
        categories,
        price_presets,
        ratings,
        in_stock_href,
        sort_options,
        category_id: filters.category.id(),
        active_filter_count: filters.active_filter_count(max_price),
        clear_href: listing_href(&FilterState::cleared(max_price), view, 1),
        total_items: page.total_items,
        previous_href: page
            .has_previous()
            .then(|| listing_href(&filters, view, page.page - 1)),
        next_href: page
            .has_next()
            .then(|| listing_href(&filters, view, page.page + 1)),
        pages,
        page: page.page,
        total_pages: page.total_pages,
        products: page.items.into_iter().map(ProductCardView::from).collect(),
        filters,
    })
}

/// Most expensive product in the catalog, in whole rupees.
fn catalog_max_price() -> i64 {
    price_bounds(catalog::products()).map_or(PriceRange::default().max, |(_, max)| max)
}

fn find_product(id: &str) -> Result<&'static Product> {
    id.parse::<ProductId>()
        .ok()
        .and_then(catalog::product)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Display product detail page.
#[instrument(skip(layout))]
pub async fn show(layout: Layout, Path(id): Path<String>) -> Result<impl IntoResponse> {
    let product = find_product(&id)?;
    let related_products = catalog::products()
        .iter()
        .filter(|other| other.category == product.category && other.id != product.id)
        .take(3)
        .map(ProductCardView::from)
        .collect();

    Ok(ProductShowTemplate {
        layout,
        product: ProductCardView::from(product),
        related_products,
    })
}

/// Quick view fragment for the listing's modal.
#[instrument]
pub async fn quick_view(Path(id): Path<String>) -> Result<impl IntoResponse> {
    let product = find_product(&id)?;
    Ok(QuickViewTemplate {
        product: ProductCardView::from(product),
    })
}

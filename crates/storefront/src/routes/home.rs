//! Home and about page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use hafiz_sajid_core::catalog;
use tracing::instrument;

use crate::content::{
    ABOUT_STATS, FEATURES, HOME_STATS, Highlight, MILESTONES, Milestone, Stat, TEAM, TeamMember,
    VALUES,
};
use crate::layout::Layout;
use crate::routes::products::ProductCardView;

/// Number of products featured on the home page.
pub const FEATURED_COUNT: usize = 4;

pub const HERO_BADGE: &str = "🐔 Premium Quality Poultry Medicines 🐔";
pub const HERO_TAGLINE: &str = "Your trusted partner in poultry healthcare. Providing premium quality medicines and supplements for a healthy and productive flock.";

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub hero_badge: &'static str,
    pub hero_tagline: &'static str,
    pub stats: &'static [Stat],
    pub featured_products: Vec<ProductCardView>,
    pub features: &'static [Highlight],
}

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub layout: Layout,
    pub stats: &'static [Stat],
    pub values: &'static [Highlight],
    pub team: &'static [TeamMember],
    pub milestones: &'static [Milestone],
}

/// Display the home page.
#[instrument(skip(layout))]
pub async fn home(layout: Layout) -> impl IntoResponse {
    let featured_products = catalog::products()
        .iter()
        .take(FEATURED_COUNT)
        .map(ProductCardView::from)
        .collect();

    HomeTemplate {
        layout,
        hero_badge: HERO_BADGE,
        hero_tagline: HERO_TAGLINE,
        stats: &HOME_STATS,
        featured_products,
        features: &FEATURES,
    }
}

/// Display the about page.
#[instrument(skip(layout))]
pub async fn about(layout: Layout) -> impl IntoResponse {
    AboutTemplate {
        layout,
        stats: &ABOUT_STATS,
        values: &VALUES,
        team: &TEAM,
        milestones: &MILESTONES,
    }
}

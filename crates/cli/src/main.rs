//! Hafiz Sajid CLI - Catalog queries and admin setup.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog with the storefront's filters
//! hs-cli catalog list --category vitamins --sort rating
//!
//! # List coupon codes
//! hs-cli catalog coupons
//!
//! # Hash the dashboard password
//! hs-cli admin hash-password --password 'correct horse'
//! ```
//!
//! # Commands
//!
//! - `catalog list` - Filter, sort and paginate the product catalog
//! - `catalog coupons` - Show coupon codes and their discounts
//! - `admin hash-password` - Produce an `ADMIN_PASSWORD_HASH` value

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use hafiz_sajid_core::query::DEFAULT_MAX_PRICE;
use secrecy::SecretString;

mod commands;

#[derive(Parser)]
#[command(name = "hs-cli")]
#[command(author, version, about = "Hafiz Sajid CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Set up the dashboard account
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products, filtered and sorted like the storefront listing
    List {
        /// Category id (`all`, `vitamins`, `antibiotics`, `vaccines`, `supplements`)
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Lowest price in whole rupees
        #[arg(long, default_value_t = 0)]
        min_price: i64,

        /// Highest price in whole rupees
        #[arg(long, default_value_t = DEFAULT_MAX_PRICE)]
        max_price: i64,

        /// Minimum average rating (0 to 5)
        #[arg(short, long)]
        rating: Option<f32>,

        /// Only products in stock
        #[arg(long)]
        in_stock: bool,

        /// Sort key (`popular`, `newest`, `price-low`, `price-high`, `rating`)
        #[arg(short, long, default_value = "popular")]
        sort: String,

        /// Text to search for in name, description and category
        #[arg(short = 'q', long, default_value = "")]
        query: String,

        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Use list view paging (8 per page instead of 12)
        #[arg(long)]
        list_view: bool,
    },
    /// Show coupon codes
    Coupons,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Hash a password for `ADMIN_PASSWORD_HASH`
    HashPassword {
        /// Password to hash (defaults to `ADMIN_PASSWORD`)
        #[arg(short, long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List {
                category,
                min_price,
                max_price,
                rating,
                in_stock,
                sort,
                query,
                page,
                list_view,
            } => {
                let options = commands::catalog::ListOptions {
                    category,
                    min_price,
                    max_price,
                    rating,
                    in_stock,
                    sort,
                    search: query,
                    page,
                    list_view,
                };
                commands::catalog::list(&options)?;
            }
            CatalogAction::Coupons => commands::catalog::coupons(),
        },
        Commands::Admin { action } => match action {
            AdminAction::HashPassword { password } => {
                commands::admin::hash(password.map(SecretString::from))?;
            }
        },
    }
    Ok(())
}

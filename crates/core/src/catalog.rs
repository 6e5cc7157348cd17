//! The fixed product catalog.
//!
//! The catalog is reference data: six products, four categories and the
//! company's contact details. Prices are declared as display labels and
//! normalized into [`Price`] values exactly once, the first time the catalog
//! is read.

use core::fmt;
use core::str::FromStr;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::types::{Price, PriceError, ProductId};

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vitamins,
    Antibiotics,
    Vaccines,
    Supplements,
}

impl Category {
    /// All categories in menu order.
    pub const ALL: [Self; 4] = [
        Self::Vitamins,
        Self::Antibiotics,
        Self::Vaccines,
        Self::Supplements,
    ];

    /// Identifier used in URLs and filters.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Vitamins => "vitamins",
            Self::Antibiotics => "antibiotics",
            Self::Vaccines => "vaccines",
            Self::Supplements => "supplements",
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Vitamins => "Vitamins",
            Self::Antibiotics => "Antibiotics",
            Self::Vaccines => "Vaccines",
            Self::Supplements => "Supplements",
        }
    }

    /// Menu icon.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Vitamins => "💊",
            Self::Antibiotics => "🔬",
            Self::Vaccines => "💉",
            Self::Supplements => "⚡",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error returned for an unknown category id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

/// Category menu entry, including the synthetic `all` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

/// Category menu in display order.
pub const CATEGORIES: [CategoryInfo; 5] = [
    CategoryInfo {
        id: "all",
        name: "All Products",
        icon: "📦",
    },
    CategoryInfo {
        id: "vitamins",
        name: "Vitamins",
        icon: "💊",
    },
    CategoryInfo {
        id: "antibiotics",
        name: "Antibiotics",
        icon: "🔬",
    },
    CategoryInfo {
        id: "vaccines",
        name: "Vaccines",
        icon: "💉",
    },
    CategoryInfo {
        id: "supplements",
        name: "Supplements",
        icon: "⚡",
    },
];

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub original_price: Option<Price>,
    pub image: String,
    pub description: String,
    pub category: Category,
    /// Average rating, 0 to 5.
    pub rating: f32,
    pub reviews: u32,
    pub in_stock: bool,
    /// Largest quantity a single cart line may hold.
    pub max_per_order: u32,
}

impl Product {
    /// Percentage saved against the original price, rounded to the nearest
    /// whole percent.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price?;
        if original.amount <= self.price.amount || original.is_zero() {
            return None;
        }
        let saved = (original.amount - self.price.amount) / original.amount * Decimal::ONE_HUNDRED;
        saved.round().to_u32()
    }

    /// Case-insensitive substring match against name, description and
    /// category. `needle` must already be lowercase.
    #[must_use]
    pub fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.category.id().contains(needle)
    }
}

/// Declarative product record as it appears in the source data.
struct ProductRecord {
    id: i32,
    name: &'static str,
    price: &'static str,
    original_price: Option<&'static str>,
    image: &'static str,
    description: &'static str,
    category: Category,
    rating: f32,
    reviews: u32,
    in_stock: bool,
    max_per_order: u32,
}

impl ProductRecord {
    fn normalize(&self) -> Result<Product, PriceError> {
        Ok(Product {
            id: ProductId::new(self.id),
            name: self.name.to_owned(),
            price: Price::from_label(self.price)?,
            original_price: self.original_price.map(Price::from_label).transpose()?,
            image: self.image.to_owned(),
            description: self.description.to_owned(),
            category: self.category,
            rating: self.rating,
            reviews: self.reviews,
            in_stock: self.in_stock,
            max_per_order: self.max_per_order,
        })
    }
}

const RECORDS: [ProductRecord; 6] = [
    ProductRecord {
        id: 1,
        name: "Poultry Shield Pro",
        price: "Rs. 1,499",
        original_price: Some("Rs. 1,799"),
        image: "/static/images/n1.jpeg",
        description: "Advanced immune booster with prebiotics for healthy flock development",
        category: Category::Supplements,
        rating: 4.8,
        reviews: 128,
        in_stock: true,
        max_per_order: 10,
    },
    ProductRecord {
        id: 2,
        name: "Vitamin Complex Gold",
        price: "Rs. 899",
        original_price: Some("Rs. 1,099"),
        image: "/static/images/n2.jpeg",
        description: "Essential vitamins A, D3, E, B-complex for optimal growth",
        category: Category::Vitamins,
        rating: 4.6,
        reviews: 95,
        in_stock: true,
        max_per_order: 15,
    },
    ProductRecord {
        id: 3,
        name: "Anti-Stress Formula",
        price: "Rs. 749",
        original_price: None,
        image: "/static/images/n3.jpeg",
        description: "Reduces stress during vaccination and transportation",
        category: Category::Supplements,
        rating: 4.7,
        reviews: 156,
        in_stock: true,
        max_per_order: 8,
    },
    ProductRecord {
        id: 4,
        name: "Growth Accelerator",
        price: "Rs. 1,299",
        original_price: Some("Rs. 1,499"),
        image: "/static/images/n4.jpeg",
        description: "Natural growth promoters for better weight gain",
        category: Category::Supplements,
        rating: 4.9,
        reviews: 203,
        in_stock: true,
        max_per_order: 12,
    },
    ProductRecord {
        id: 5,
        name: "Antibiotic Plus",
        price: "Rs. 1,899",
        original_price: None,
        image: "/static/images/n5.jpeg",
        description: "Broad-spectrum antibiotic for bacterial infections",
        category: Category::Antibiotics,
        rating: 4.5,
        reviews: 67,
        in_stock: true,
        max_per_order: 5,
    },
    ProductRecord {
        id: 6,
        name: "Newcastle Vaccine",
        price: "Rs. 599",
        original_price: None,
        image: "/static/images/n1.jpeg",
        description: "Protects against Newcastle disease",
        category: Category::Vaccines,
        rating: 4.8,
        reviews: 89,
        in_stock: true,
        max_per_order: 20,
    },
];

static CATALOG: LazyLock<Vec<Product>> = LazyLock::new(|| {
    RECORDS
        .iter()
        .filter_map(|record| record.normalize().ok())
        .collect()
});

/// All catalog products, in declaration order.
#[must_use]
pub fn products() -> &'static [Product] {
    &CATALOG
}

/// Look up a product by id.
#[must_use]
pub fn product(id: ProductId) -> Option<&'static Product> {
    CATALOG.iter().find(|product| product.id == id)
}

/// Opening hours shown in the footer and on the contact page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BusinessHours {
    pub mon_fri: &'static str,
    pub sat: &'static str,
    pub sun: &'static str,
}

/// Company contact details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompanyInfo {
    pub name: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub hours: BusinessHours,
}

/// The shop's contact details.
pub const COMPANY_INFO: CompanyInfo = CompanyInfo {
    name: "Hafiz Sajid Poultry Medicines",
    address: "123 Poultry Market, Lahore, Pakistan",
    phone: "+92 300 1234567",
    email: "info@hafizsajid.com",
    hours: BusinessHours {
        mon_fri: "9:00 AM - 8:00 PM",
        sat: "10:00 AM - 6:00 PM",
        sun: "Closed",
    },
};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_every_record_normalizes() {
        for record in &RECORDS {
            assert!(record.normalize().is_ok(), "record {} failed", record.id);
        }
        assert_eq!(products().len(), RECORDS.len());
    }

    #[test]
    fn test_prices_normalized_from_labels() {
        let prices: Vec<i64> = products().iter().map(|p| p.price.whole_units()).collect();
        assert_eq!(prices, vec![1499, 899, 749, 1299, 1899, 599]);
    }

    #[test]
    fn test_lookup_by_id() {
        let product = product(ProductId::new(4)).unwrap();
        assert_eq!(product.name, "Growth Accelerator");
        assert!(super::product(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_discount_percent() {
        let shield = product(ProductId::new(1)).unwrap();
        // (1799 - 1499) / 1799 = 16.68%
        assert_eq!(shield.discount_percent(), Some(17));
        let vaccine = product(ProductId::new(6)).unwrap();
        assert_eq!(vaccine.discount_percent(), None);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Vaccines".parse::<Category>().unwrap(), Category::Vaccines);
        assert!("all".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_menu_matches_enum() {
        let ids: Vec<&str> = CATEGORIES.iter().skip(1).map(|c| c.id).collect();
        let expected: Vec<&str> = Category::ALL.iter().map(Category::id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_text_match_covers_all_fields() {
        let vaccine = product(ProductId::new(6)).unwrap();
        assert!(vaccine.matches_text("newcastle"));
        assert!(vaccine.matches_text("disease"));
        assert!(vaccine.matches_text("vacc"));
        assert!(!vaccine.matches_text("vitamin"));
    }
}

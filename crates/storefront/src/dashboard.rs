//! Admin dashboard data.
//!
//! The dashboard is a mockup: every figure here is fixed, and the actions
//! offered on it only report what they would have done.

use core::fmt;
use core::str::FromStr;

use hafiz_sajid_core::catalog::{self, Product};
use hafiz_sajid_core::{CustomerId, OrderStatus, Price, ProductId};

/// Dashboard tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Products,
    Orders,
    Customers,
}

impl Tab {
    pub const ALL: [Self; 4] = [Self::Overview, Self::Products, Self::Orders, Self::Customers];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Products => "products",
            Self::Orders => "orders",
            Self::Customers => "customers",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Products => "Products",
            Self::Orders => "Orders",
            Self::Customers => "Customers",
        }
    }

    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Overview => "📊",
            Self::Products => "📦",
            Self::Orders => "🛒",
            Self::Customers => "👥",
        }
    }
}

/// Reporting period selector. Only changes the heading; the figures are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    Today,
    #[default]
    Week,
    Month,
    Year,
}

impl Period {
    pub const ALL: [Self; 4] = [Self::Today, Self::Week, Self::Month, Self::Year];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Week => "This Week",
            Self::Month => "This Month",
            Self::Year => "This Year",
        }
    }
}

/// Error returned for an unknown tab or period.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dashboard option: {0}")]
pub struct UnknownOption(pub String);

macro_rules! parse_by_name {
    ($ty:ty) => {
        impl FromStr for $ty {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|option| option.as_str().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| UnknownOption(s.to_owned()))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

parse_by_name!(Tab);
parse_by_name!(Period);

/// Headline figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_products: u32,
    pub total_orders: u32,
    pub total_customers: u32,
    pub total_revenue: i64,
    pub pending_orders: u32,
    pub out_of_stock: u32,
}

pub const STATS: DashboardStats = DashboardStats {
    total_products: 156,
    total_orders: 1243,
    total_customers: 892,
    total_revenue: 2_458_900,
    pending_orders: 23,
    out_of_stock: 12,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub id: &'static str,
    pub customer: &'static str,
    pub date: &'static str,
    pub amount: i64,
    pub status: OrderStatus,
    pub items: u32,
}

pub static RECENT_ORDERS: [Order; 5] = [
    Order {
        id: "ORD-001",
        customer: "Muhammad Ali",
        date: "2024-01-15",
        amount: 4500,
        status: OrderStatus::Delivered,
        items: 3,
    },
    Order {
        id: "ORD-002",
        customer: "Ahmed Khan",
        date: "2024-01-15",
        amount: 2800,
        status: OrderStatus::Shipped,
        items: 2,
    },
    Order {
        id: "ORD-003",
        customer: "Sara Ahmed",
        date: "2024-01-14",
        amount: 6200,
        status: OrderStatus::Processing,
        items: 4,
    },
    Order {
        id: "ORD-004",
        customer: "Bilal Hassan",
        date: "2024-01-14",
        amount: 1900,
        status: OrderStatus::Pending,
        items: 1,
    },
    Order {
        id: "ORD-005",
        customer: "Farah Khan",
        date: "2024-01-13",
        amount: 8300,
        status: OrderStatus::Delivered,
        items: 5,
    },
];

/// Look up a recent order by id, ignoring case.
#[must_use]
pub fn order(id: &str) -> Option<&'static Order> {
    RECENT_ORDERS
        .iter()
        .find(|order| order.id.eq_ignore_ascii_case(id.trim()))
}

/// A product flagged on the low stock panel.
#[derive(Debug, Clone, PartialEq)]
pub struct LowStock {
    pub product: &'static Product,
    pub stock: u32,
}

/// Units on hand for the products shown on the low stock panel.
const LOW_STOCK_COUNTS: [(i32, u32); 3] = [(1, 3), (2, 7), (3, 2)];

#[must_use]
pub fn low_stock() -> Vec<LowStock> {
    LOW_STOCK_COUNTS
        .iter()
        .filter_map(|(id, stock)| {
            catalog::product(ProductId::new(*id)).map(|product| LowStock {
                product,
                stock: *stock,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub initial: char,
    pub orders: u32,
    pub spent: Price,
}

/// Order count and spend for customers 1 to 6.
const CUSTOMER_ACTIVITY: [(u32, i64); 6] = [
    (12, 18_450),
    (4, 6_200),
    (19, 42_300),
    (7, 9_850),
    (2, 1_900),
    (15, 27_600),
];

#[must_use]
pub fn customers() -> Vec<Customer> {
    CUSTOMER_ACTIVITY
        .iter()
        .zip(1_i32..)
        .zip('A'..='Z')
        .map(|(((orders, spent), id), initial)| Customer {
            id: CustomerId::new(id),
            name: format!("Customer {id}"),
            email: format!("customer{id}@email.com"),
            initial,
            orders: *orders,
            spent: Price::from_whole(*spent),
        })
        .collect()
}

/// A dashboard action. None of them change anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    EditProduct(ProductId),
    DeleteProduct(ProductId),
    RestockProduct(ProductId),
    ViewOrder(String),
    UpdateOrder(String),
    ViewCustomer(CustomerId),
}

impl AdminAction {
    /// Notice reported back to the admin.
    #[must_use]
    pub fn notice(&self) -> String {
        match self {
            Self::EditProduct(id) => format!("Editing product ID: {id}"),
            Self::DeleteProduct(id) => format!("Product {id} deleted successfully!"),
            Self::RestockProduct(id) => format!("Restock request sent for product ID: {id}"),
            Self::ViewOrder(id) => format!("Viewing order: {id}"),
            Self::UpdateOrder(id) => format!("Update order: {id}"),
            Self::ViewCustomer(id) => format!("Viewing customer details for Customer {id}"),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::EditProduct(_) => "edit_product",
            Self::DeleteProduct(_) => "delete_product",
            Self::RestockProduct(_) => "restock_product",
            Self::ViewOrder(_) => "view_order",
            Self::UpdateOrder(_) => "update_order",
            Self::ViewCustomer(_) => "view_customer",
        }
    }

    /// Whether the action must be confirmed first.
    #[must_use]
    pub const fn needs_confirmation(&self) -> bool {
        matches!(self, Self::DeleteProduct(_))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_and_period_parsing() {
        assert_eq!("orders".parse::<Tab>().unwrap(), Tab::Orders);
        assert_eq!(" MONTH ".parse::<Period>().unwrap(), Period::Month);
        assert!("reports".parse::<Tab>().is_err());
        assert_eq!(Period::default(), Period::Week);
        assert_eq!(Tab::default(), Tab::Overview);
    }

    #[test]
    fn test_low_stock_uses_first_three_products() {
        let rows = low_stock();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].product.name, "Poultry Shield Pro");
        assert_eq!(rows[2].stock, 2);
    }

    #[test]
    fn test_customers() {
        let customers = customers();
        assert_eq!(customers.len(), 6);
        assert_eq!(customers[0].name, "Customer 1");
        assert_eq!(customers[0].initial, 'A');
        assert_eq!(customers[5].email, "customer6@email.com");
        assert_eq!(customers[5].initial, 'F');
    }

    #[test]
    fn test_action_notices() {
        let id = ProductId::new(4);
        assert_eq!(AdminAction::EditProduct(id).notice(), "Editing product ID: 4");
        assert_eq!(
            AdminAction::DeleteProduct(id).notice(),
            "Product 4 deleted successfully!"
        );
        assert_eq!(
            AdminAction::ViewCustomer(CustomerId::new(2)).notice(),
            "Viewing customer details for Customer 2"
        );
        assert!(AdminAction::DeleteProduct(id).needs_confirmation());
        assert!(!AdminAction::ViewOrder("ORD-001".to_string()).needs_confirmation());
    }

    #[test]
    fn test_order_lookup() {
        assert_eq!(order("ord-003").unwrap().customer, "Sara Ahmed");
        assert!(order("ORD-999").is_none());
        let open = RECENT_ORDERS.iter().filter(|o| o.status.is_open()).count();
        assert_eq!(open, 2);
    }
}

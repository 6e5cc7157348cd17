//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices arrive as display labels (`"Rs. 1,499"`). They are
//! normalized into [`Price`] once, when the catalog is built, and only turned
//! back into text at render time through the `Display` impl.

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when parsing a price label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// The label contains no digits at all.
    #[error("price label {0:?} contains no digits")]
    NoDigits(String),
    /// The digits do not fit into a price amount.
    #[error("price label {0:?} is out of range")]
    OutOfRange(String),
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (rupees, not paisa).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A zero amount in the default currency.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(Decimal::ZERO, CurrencyCode::PKR)
    }

    /// Create a price from a whole number of rupees.
    #[must_use]
    pub fn from_whole(amount: i64) -> Self {
        Self::new(Decimal::from(amount), CurrencyCode::PKR)
    }

    /// Parse a display label such as `"Rs. 1,499"`.
    ///
    /// Every non-digit character is stripped and the remaining digits are read
    /// as a whole number of rupees.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NoDigits`] if the label has no digits and
    /// [`PriceError::OutOfRange`] if the digits overflow.
    pub fn from_label(label: &str) -> Result<Self, PriceError> {
        let digits: String = label.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(PriceError::NoDigits(label.to_owned()));
        }
        let whole = digits
            .parse::<i64>()
            .map_err(|_| PriceError::OutOfRange(label.to_owned()))?;
        Ok(Self::from_whole(whole))
    }

    /// Integer magnitude of the price, used for price-range filtering.
    #[must_use]
    pub fn whole_units(&self) -> i64 {
        self.amount.trunc().to_i64().unwrap_or(i64::MAX)
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency_code)
    }

    /// Sum of two prices.
    #[must_use]
    pub fn plus(self, other: Self) -> Self {
        Self::new(self.amount + other.amount, self.currency_code)
    }

    /// Difference of two prices, floored at zero.
    #[must_use]
    pub fn saturating_sub(self, other: Self) -> Self {
        let amount = (self.amount - other.amount).max(Decimal::ZERO);
        Self::new(amount, self.currency_code)
    }

    /// `percent` percent of this price, rounded to two decimal places.
    #[must_use]
    pub fn percent(self, percent: Decimal) -> Self {
        let amount = (self.amount * percent / Decimal::ONE_HUNDRED).round_dp(2);
        Self::new(amount, self.currency_code)
    }

    /// Whether the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self.amount.round_dp(2);
        let sign = if amount.is_sign_negative() && !amount.is_zero() {
            "-"
        } else {
            ""
        };
        let abs = amount.abs();
        let whole = abs.trunc();
        let paisa = ((abs - whole) * Decimal::ONE_HUNDRED)
            .round()
            .to_u64()
            .unwrap_or(0);
        let grouped = group_thousands(whole.to_u64().unwrap_or(0));

        write!(f, "{}{sign}{grouped}", self.currency_code.symbol())?;
        if paisa > 0 {
            write!(f, ".{paisa:02}")?;
        }
        Ok(())
    }
}

/// Insert `,` separators every three digits.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// ISO 4217 currency codes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum CurrencyCode {
    #[default]
    PKR,
    USD,
}

impl CurrencyCode {
    /// Display prefix for amounts in this currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::PKR => "Rs. ",
            Self::USD => "$",
        }
    }
}

//! Type-safe price representation using decimal arithmetic.
//!
//! The catalog is priced in Indian rupees only, so a [`Price`] is a bare
//! decimal amount on the wire (`"price": 89`) and carries its currency only
//! when formatted for display.

use std::iter::Sum;
use std::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Display symbol for the store currency (INR).
pub const CURRENCY_SYMBOL: &str = "₹";

/// A catalog price in the store currency's standard unit (rupees, not paise).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a whole-rupee amount.
    #[must_use]
    pub fn from_whole(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }

    /// Line price for `quantity` units.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Difference to a higher reference price, if any.
    #[must_use]
    pub fn discount_from(self, original: Self) -> Option<Self> {
        (original.0 > self.0).then(|| Self(original.0 - self.0))
    }

    /// Format for display with two decimals (e.g., "₹89.00").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{CURRENCY_SYMBOL}{:.2}", self.0)
    }

    /// Format for display without forcing decimals (e.g., "₹89").
    #[must_use]
    pub fn display_short(&self) -> String {
        format!("{CURRENCY_SYMBOL}{}", self.0.normalize())
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        self.times(rhs)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_deserializes_from_number() {
        let price: Price = serde_json::from_str("89").unwrap();
        assert_eq!(price, Price::from_whole(89));
    }

    #[test]
    fn test_price_sum_is_exact() {
        let total: Price = [Price::from_whole(89) * 2, Price::from_whole(95) * 1]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_whole(273));
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price::from_whole(273).display(), "₹273.00");
        assert_eq!(Price::from_whole(89).display_short(), "₹89");
    }

    #[test]
    fn test_discount_from() {
        let price = Price::from_whole(89);
        assert_eq!(
            price.discount_from(Price::from_whole(120)),
            Some(Price::from_whole(31))
        );
        assert_eq!(price.discount_from(Price::from_whole(89)), None);
    }
}

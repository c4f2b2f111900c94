//! Money type for monetary values.
//!
//! Amounts are held as exact decimals in the store currency (USD), so
//! recomputing the same totals always lands on the same value. Rounding to
//! cents happens only when an amount is rendered for display.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

/// A monetary amount.
///
/// Serializes as a plain JSON number (e.g. `19.99`), matching the shape the
/// storefront persists and the backing store returns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Money(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Money {
    /// Create money from a decimal amount.
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create money from a whole number of cents.
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Create money from a whole number of currency units.
    pub fn from_major(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// Zero money.
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// The underlying decimal amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Check if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if the amount is positive.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Check if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Take a percentage of this amount (e.g. `10` for 10%).
    pub fn percentage(&self, percent: Decimal) -> Money {
        Self(self.0 * percent / Decimal::from(100))
    }

    /// Format with currency symbol, rounded to cents: `$49.99`.
    pub fn display(&self) -> String {
        format!("${:.2}", self.0)
    }

    /// Format without currency symbol: `49.99`.
    pub fn display_amount(&self) -> String {
        format!("{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, quantity: i64) -> Money {
        Money(self.0 * Decimal::from(quantity))
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, rate: Decimal) -> Money {
        Money(self.0 * rate)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_creation() {
        let price = Money::from_cents(1999);
        assert_eq!(price.display(), "$19.99");
        assert_eq!(Money::from_major(20), Money::from_cents(2000));
        assert!(Money::zero().is_zero());
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::from_cents(1050);
        let b = Money::from_cents(250);

        assert_eq!(a + b, Money::from_cents(1300));
        assert_eq!(a - b, Money::from_cents(800));
        assert_eq!(b * 3, Money::from_cents(750));
    }

    #[test]
    fn test_money_percentage() {
        let subtotal = Money::from_major(40);
        assert_eq!(subtotal.percentage(Decimal::from(10)), Money::from_major(4));

        // 8% of 41.00 is exactly 3.28
        let taxable = Money::from_major(41);
        assert_eq!(
            taxable * Decimal::new(8, 2),
            Money::from_cents(328)
        );
    }

    #[test]
    fn test_money_sum() {
        let total: Money = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(350),
        ]
        .into_iter()
        .sum();
        assert_eq!(total, Money::from_cents(650));
    }

    #[test]
    fn test_money_ordering() {
        let cheap = Money::from_cents(500);
        let pricey = Money::from_cents(2500);
        assert!(cheap < pricey);
        assert_eq!(cheap.min(pricey), cheap);
    }

    #[test]
    fn test_money_signs() {
        assert!(Money::from_cents(1).is_positive());
        assert!((Money::zero() - Money::from_cents(1)).is_negative());
        assert!(!Money::zero().is_positive());
    }

    #[test]
    fn test_money_serializes_as_plain_number() {
        let price = Money::from_cents(2000);
        let value = serde_json::to_value(price).unwrap();
        assert_eq!(value, serde_json::json!(20.0));

        let back: Money = serde_json::from_value(serde_json::json!(19.99)).unwrap();
        assert_eq!(back, Money::from_cents(1999));
    }

    #[test]
    fn test_display_rounds_only_at_render() {
        // a third of a dollar keeps its full precision internally
        let third = Money::from_major(1).percentage(Decimal::from(100) / Decimal::from(3));
        assert_eq!(third.display_amount(), "0.33");
        assert_ne!(third, Money::from_cents(33));
    }
}

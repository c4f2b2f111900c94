//! Order total computation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Flat tax rate applied to the discounted order amount plus shipping.
pub fn tax_rate() -> Decimal {
    Decimal::new(8, 2) // 8%
}

/// Complete totals breakdown for an order.
///
/// All five figures are derived from three inputs by [`compute`](Self::compute)
/// and always satisfy `total = subtotal - discount + shipping + tax`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OrderTotals {
    /// Sum of line totals across the cart.
    pub subtotal: Money,
    /// Coupon discount taken off the subtotal.
    pub discount: Money,
    /// Cost of the selected shipping method.
    pub shipping: Money,
    /// Tax on the discounted amount plus shipping.
    pub tax: Money,
    /// Final amount charged.
    pub total: Money,
}

impl OrderTotals {
    /// Derive tax and total from the three inputs.
    ///
    /// Pure arithmetic with no rounding; amounts keep full precision until
    /// rendered. Callers keep the discount within the subtotal (the coupon
    /// clamp) and shipping non-negative, so the result is never negative.
    pub fn compute(subtotal: Money, discount: Money, shipping: Money) -> Self {
        let taxable = subtotal - discount + shipping;
        let tax = taxable * tax_rate();
        let total = taxable + tax;
        Self {
            subtotal,
            discount,
            shipping,
            tax,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_order() {
        // two items at $20, a 10% coupon, $5 shipping
        let totals = OrderTotals::compute(
            Money::from_major(40),
            Money::from_major(4),
            Money::from_major(5),
        );

        assert_eq!(totals.subtotal, Money::from_major(40));
        assert_eq!(totals.discount, Money::from_major(4));
        assert_eq!(totals.shipping, Money::from_major(5));
        assert_eq!(totals.tax, Money::from_cents(328));
        assert_eq!(totals.total, Money::from_cents(4428));
    }

    #[test]
    fn test_no_discount_no_shipping() {
        let totals = OrderTotals::compute(Money::from_major(50), Money::zero(), Money::zero());
        assert_eq!(totals.tax, Money::from_major(4));
        assert_eq!(totals.total, Money::from_major(54));
    }

    #[test]
    fn test_discount_covering_the_subtotal() {
        // a clamped coupon can wipe out the subtotal; tax applies to shipping only
        let totals = OrderTotals::compute(
            Money::from_major(10),
            Money::from_major(10),
            Money::from_major(5),
        );
        assert_eq!(totals.tax, Money::from_cents(40));
        assert_eq!(totals.total, Money::from_cents(540));
    }

    #[test]
    fn test_identity_holds() {
        let totals = OrderTotals::compute(
            Money::from_cents(3333),
            Money::from_cents(499),
            Money::from_cents(750),
        );
        assert_eq!(
            totals.total,
            totals.subtotal - totals.discount + totals.shipping + totals.tax
        );
    }

    #[test]
    fn test_recomputation_is_stable() {
        let first = OrderTotals::compute(
            Money::from_cents(2999),
            Money::from_cents(300),
            Money::from_cents(599),
        );
        let second = OrderTotals::compute(first.subtotal, first.discount, first.shipping);
        assert_eq!(first, second);
    }
}

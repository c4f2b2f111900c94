//! Cart line items and the derived cart summary.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::ids::{LineItemId, ProductId};
use crate::money::Money;

/// One row in the cart.
///
/// The persisted shape is `{id, product_id, quantity, price, product}`.
/// `price` is the unit price snapshot taken when the row was created and
/// `product` is the denormalized product record at that moment; both get
/// refreshed by reconciliation when the catalog moves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    /// Locally generated row identifier.
    pub id: LineItemId,
    /// Product this row refers to.
    pub product_id: ProductId,
    /// Units of the product.
    pub quantity: i64,
    /// Unit price snapshot.
    pub price: Money,
    /// Product snapshot taken at add time.
    pub product: Product,
}

impl CartLineItem {
    /// Create a line item, snapshotting the product's current price.
    pub fn new(product: Product, quantity: i64) -> Self {
        Self {
            id: LineItemId::generate(),
            product_id: product.id.clone(),
            quantity,
            price: product.price,
            product,
        }
    }

    /// Line total: unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

/// Derived view of the cart.
///
/// Recomputed from the rows on every read and never persisted, so it can
/// never drift from the list it was built from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartSummary {
    /// Rows in insertion order.
    pub items: Vec<CartLineItem>,
    /// Sum of line totals over all rows.
    pub subtotal: Money,
    /// Number of distinct rows.
    pub item_count: usize,
    /// Sum of quantities across rows.
    pub total_quantity: i64,
}

impl CartSummary {
    /// Build the summary from the current rows.
    pub fn from_items(items: Vec<CartLineItem>) -> Self {
        let subtotal = items.iter().map(|item| item.line_total()).sum();
        let item_count = items.len();
        let total_quantity = items.iter().map(|item| item.quantity).sum();
        Self {
            items,
            subtotal,
            item_count,
            total_quantity,
        }
    }

    /// Whether the cart has no rows.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let product = Product::new("Kufiya", Money::from_cents(2000));
        let item = CartLineItem::new(product, 3);
        assert_eq!(item.line_total(), Money::from_cents(6000));
    }

    #[test]
    fn test_summary_from_items() {
        let a = CartLineItem::new(Product::new("A", Money::from_cents(1000)), 2);
        let b = CartLineItem::new(Product::new("B", Money::from_cents(550)), 1);

        let summary = CartSummary::from_items(vec![a, b]);
        assert_eq!(summary.subtotal, Money::from_cents(2550));
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.total_quantity, 3);
        assert!(!summary.is_empty());
    }

    #[test]
    fn test_empty_summary() {
        let summary = CartSummary::from_items(Vec::new());
        assert!(summary.is_empty());
        assert_eq!(summary.subtotal, Money::zero());
        assert_eq!(summary.total_quantity, 0);
    }

    #[test]
    fn test_persisted_shape() {
        let product = Product::new("Kufiya", Money::from_cents(2000));
        let item = CartLineItem::new(product.clone(), 2);

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["product_id"], product.id.as_str());
        assert_eq!(value["quantity"], 2);
        assert_eq!(value["price"], serde_json::json!(20.0));
        assert_eq!(value["product"]["name"], "Kufiya");

        let back: CartLineItem = serde_json::from_value(value).unwrap();
        assert_eq!(back, item);
    }
}

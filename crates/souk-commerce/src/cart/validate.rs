//! Cart reconciliation against the authoritative catalog.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use souk_storage::StorageBackend;
use tracing::warn;

use crate::backend::CommerceBackend;
use crate::cart::item::CartLineItem;
use crate::cart::store::CartStore;
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;

/// A correction found while reconciling a cart row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CartIssue {
    /// The product no longer exists or was deactivated; the row is dropped.
    ProductUnavailable { name: String },
    /// Requested quantity exceeded stock; the row was clamped down.
    QuantityAdjusted { name: String, available: i64 },
    /// The catalog price moved since the row was created; the snapshot was
    /// refreshed.
    PriceChanged { name: String, from: Money, to: Money },
}

impl CartIssue {
    /// Message shown to the shopper for this correction.
    pub fn message(&self) -> String {
        match self {
            CartIssue::ProductUnavailable { name } => {
                format!("{} is no longer available", name)
            }
            CartIssue::QuantityAdjusted { name, available } => {
                format!("Only {} units of {} are available", available, name)
            }
            CartIssue::PriceChanged { name, from, to } => {
                format!("Price of {} has changed from {} to {}", name, from, to)
            }
        }
    }
}

impl fmt::Display for CartIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Outcome of reconciling the stored cart.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// Corrections in cart order; empty when the cart matched the catalog.
    pub issues: Vec<CartIssue>,
    /// Rows after reconciliation, present only when something changed.
    pub updated_items: Option<Vec<CartLineItem>>,
}

impl ValidationReport {
    /// Whether the cart needed no corrections.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Shopper-facing messages for every correction.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(|issue| issue.message()).collect()
    }

    fn clean() -> Self {
        Self {
            issues: Vec::new(),
            updated_items: None,
        }
    }
}

/// Reconcile cart rows against their authoritative products.
///
/// Rows whose product is missing or inactive are dropped. Quantities are
/// clamped to stock (a row clamped to zero is dropped) and stale price
/// snapshots are refreshed. Returns the corrected rows together with the
/// corrections applied, in cart order.
pub fn reconcile(
    items: Vec<CartLineItem>,
    products: &HashMap<ProductId, Product>,
) -> (Vec<CartLineItem>, Vec<CartIssue>) {
    let mut kept = Vec::with_capacity(items.len());
    let mut issues = Vec::new();

    for mut item in items {
        let product = match products.get(&item.product_id) {
            Some(p) if p.is_available() => p,
            _ => {
                issues.push(CartIssue::ProductUnavailable {
                    name: item.product.name.clone(),
                });
                continue;
            }
        };

        if item.quantity > product.stock_quantity {
            issues.push(CartIssue::QuantityAdjusted {
                name: product.name.clone(),
                available: product.stock_quantity,
            });
            if product.stock_quantity == 0 {
                continue;
            }
            item.quantity = product.stock_quantity;
        }

        if item.price != product.price {
            issues.push(CartIssue::PriceChanged {
                name: product.name.clone(),
                from: item.price,
                to: product.price,
            });
            item.price = product.price;
        }

        item.product = product.clone();
        kept.push(item);
    }

    (kept, issues)
}

/// Validate the stored cart against the backing store, persisting fixes.
///
/// Fetches the authoritative record for every product in the cart, applies
/// [`reconcile`], and writes the corrected rows back when anything changed.
/// Running it again immediately afterwards reports a clean cart.
pub async fn validate_cart<S, B>(
    cart: &CartStore<S>,
    backend: &B,
) -> Result<ValidationReport, CommerceError>
where
    S: StorageBackend,
    B: CommerceBackend,
{
    let items = cart.items();
    if items.is_empty() {
        return Ok(ValidationReport::clean());
    }

    let ids: Vec<ProductId> = items.iter().map(|item| item.product_id.clone()).collect();
    let products = backend.products_by_ids(&ids).await?;
    let lookup: HashMap<ProductId, Product> = products
        .into_iter()
        .map(|product| (product.id.clone(), product))
        .collect();

    let (kept, issues) = reconcile(items, &lookup);
    if issues.is_empty() {
        return Ok(ValidationReport::clean());
    }

    for issue in &issues {
        warn!(%issue, "cart correction");
    }
    cart.replace(&kept)?;

    Ok(ValidationReport {
        issues,
        updated_items: Some(kept),
    })
}

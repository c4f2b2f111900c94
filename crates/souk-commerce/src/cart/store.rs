//! Device-persisted cart.

use souk_storage::{StorageBackend, Store};
use tracing::{debug, warn};

use crate::cart::item::{CartLineItem, CartSummary};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::LineItemId;

/// Storage key the cart rows live under.
pub const CART_STORAGE_KEY: &str = "souk_cart_items";

/// Shopping cart persisted through a device-local storage backend.
///
/// Every operation reads the full row list, applies its change, and writes
/// the list back, so any number of views over the same backend stay in
/// agreement. Failed operations leave the stored list untouched.
pub struct CartStore<B: StorageBackend> {
    store: Store<B>,
}

impl<B: StorageBackend> CartStore<B> {
    /// Create a cart over the given backend.
    pub fn new(backend: B) -> Self {
        Self {
            store: Store::new(backend),
        }
    }

    /// Current rows in insertion order.
    ///
    /// A payload that cannot be decoded is treated as an empty cart; the
    /// next successful write replaces it.
    pub fn items(&self) -> Vec<CartLineItem> {
        match self.store.get::<Vec<CartLineItem>>(CART_STORAGE_KEY) {
            Ok(Some(items)) => items,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "cart payload unreadable, starting empty");
                Vec::new()
            }
        }
    }

    /// Summary of the current rows.
    pub fn summary(&self) -> CartSummary {
        CartSummary::from_items(self.items())
    }

    /// Whether the cart has no rows.
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Add `quantity` units of a product.
    ///
    /// Merges into the existing row when the product is already in the cart.
    /// Fails without touching the stored list when the product is inactive,
    /// the quantity is not positive, or stock cannot cover the resulting
    /// quantity.
    pub fn add_item(&self, product: &Product, quantity: i64) -> Result<LineItemId, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if !product.is_available() {
            return Err(CommerceError::ProductUnavailable(product.name.clone()));
        }

        let mut items = self.items();
        if let Some(existing) = items.iter_mut().find(|item| item.product_id == product.id) {
            let merged = existing.quantity + quantity;
            if merged > product.stock_quantity {
                return Err(CommerceError::InsufficientStock {
                    product_id: product.id.clone(),
                    requested: merged,
                    available: product.stock_quantity,
                });
            }
            existing.quantity = merged;
            let id = existing.id.clone();
            self.write(&items)?;
            debug!(product_id = %product.id, quantity = merged, "merged cart row");
            return Ok(id);
        }

        if quantity > product.stock_quantity {
            return Err(CommerceError::InsufficientStock {
                product_id: product.id.clone(),
                requested: quantity,
                available: product.stock_quantity,
            });
        }
        let item = CartLineItem::new(product.clone(), quantity);
        let id = item.id.clone();
        items.push(item);
        self.write(&items)?;
        debug!(product_id = %product.id, quantity, "added cart row");
        Ok(id)
    }

    /// Set the quantity of an existing row.
    ///
    /// A quantity of zero or less removes the row, mirroring
    /// [`remove_item`](Self::remove_item).
    pub fn set_quantity(&self, id: &LineItemId, quantity: i64) -> Result<(), CommerceError> {
        if quantity <= 0 {
            return self.remove_item(id);
        }

        let mut items = self.items();
        match items.iter_mut().find(|item| &item.id == id) {
            Some(item) if quantity > item.product.stock_quantity => {
                return Err(CommerceError::InsufficientStock {
                    product_id: item.product_id.clone(),
                    requested: quantity,
                    available: item.product.stock_quantity,
                });
            }
            Some(item) => item.quantity = quantity,
            None => return Err(CommerceError::ItemNotFound(id.clone())),
        }
        self.write(&items)?;
        debug!(item_id = %id, quantity, "updated cart row");
        Ok(())
    }

    /// Remove a row. Succeeds whether or not the row exists.
    pub fn remove_item(&self, id: &LineItemId) -> Result<(), CommerceError> {
        let mut items = self.items();
        let before = items.len();
        items.retain(|item| &item.id != id);
        if items.len() != before {
            self.write(&items)?;
            debug!(item_id = %id, "removed cart row");
        }
        Ok(())
    }

    /// Remove every row.
    pub fn clear(&self) -> Result<(), CommerceError> {
        self.store.delete(CART_STORAGE_KEY)?;
        debug!("cleared cart");
        Ok(())
    }

    /// Replace the stored rows wholesale. Used by reconciliation.
    pub(crate) fn replace(&self, items: &[CartLineItem]) -> Result<(), CommerceError> {
        self.write(items)
    }

    fn write(&self, items: &[CartLineItem]) -> Result<(), CommerceError> {
        self.store.set(CART_STORAGE_KEY, items)?;
        Ok(())
    }
}

//! Backing data store port.
//!
//! The commerce core talks to whatever holds the authoritative catalog,
//! coupons, shipping methods, and order history through [`CommerceBackend`].
//! Implementations decide transport; [`InMemoryBackend`] ships for tests
//! and development.

mod memory;

pub use memory::InMemoryBackend;

use async_trait::async_trait;
use thiserror::Error;

use crate::cart::Coupon;
use crate::catalog::Product;
use crate::checkout::{Order, OrderItem, ShippingMethod};
use crate::ids::ProductId;

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Backing-store failures.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The store could not be reached or errored out.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// A referenced record does not exist.
    #[error("record not found: {0}")]
    NotFound(String),

    /// A record failed boundary validation.
    #[error("record rejected: {0}")]
    Rejected(String),
}

/// Authoritative store behind the storefront.
#[async_trait]
pub trait CommerceBackend: Send + Sync {
    /// Fetch a product by id.
    async fn product(&self, id: &ProductId) -> BackendResult<Option<Product>>;

    /// Fetch the given products. Missing ids are simply absent from the
    /// result; the caller decides what absence means.
    async fn products_by_ids(&self, ids: &[ProductId]) -> BackendResult<Vec<Product>>;

    /// Active shipping methods, cheapest first.
    async fn active_shipping_methods(&self) -> BackendResult<Vec<ShippingMethod>>;

    /// Case-insensitive coupon lookup among active coupons only.
    async fn find_active_coupon(&self, code: &str) -> BackendResult<Option<Coupon>>;

    /// Persist an order and its lines together with their side effects as
    /// one transaction: stock decrements (floored at zero) and the coupon
    /// usage increment land with the inserts or not at all.
    async fn place_order(&self, order: &Order, items: &[OrderItem]) -> BackendResult<()>;
}

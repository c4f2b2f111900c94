//! Commerce error types.

use thiserror::Error;

use crate::backend::BackendError;
use crate::cart::CouponError;
use crate::ids::{LineItemId, ProductId};

/// Errors that can occur in cart and checkout operations.
///
/// Display strings are safe to surface to shoppers. Variants carrying
/// internal detail keep it in their fields for logging and render a generic
/// message instead.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Requested quantity cannot be covered by the product's stock.
    #[error("Insufficient stock")]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Quantity must be a positive number.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// The referenced line item is not in the cart.
    #[error("Cart item not found")]
    ItemNotFound(LineItemId),

    /// The product exists but cannot be purchased right now.
    #[error("{0} is no longer available")]
    ProductUnavailable(String),

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// A record failed a boundary check before entering the system.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A coupon could not be applied.
    #[error(transparent)]
    Coupon(#[from] CouponError),

    /// Device storage failed underneath the cart.
    #[error("Something went wrong. Please try again.")]
    Storage(#[from] souk_storage::StorageError),

    /// The backing data store failed or could not be reached.
    #[error("Something went wrong. Please try again.")]
    Backend(#[from] BackendError),
}

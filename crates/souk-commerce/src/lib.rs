//! Commerce domain types and services for Souk storefronts.
//!
//! This crate carries the client-side core of the store:
//!
//! - **Catalog**: product records with stock and availability
//! - **Cart**: device-persisted line items, reconciliation against the
//!   catalog, order totals, and coupons
//! - **Checkout**: the payment form, card checks, shipping methods, and
//!   atomic order placement
//! - **Backend**: the async port to the authoritative data store
//!
//! # Example
//!
//! ```rust
//! use souk_commerce::prelude::*;
//! use souk_storage::MemoryBackend;
//!
//! fn main() -> Result<(), CommerceError> {
//!     let cart = CartStore::new(MemoryBackend::new());
//!     let kufiya = Product::new("Classic Kufiya", Money::from_cents(2000)).with_stock(10);
//!
//!     cart.add_item(&kufiya, 2)?;
//!     let summary = cart.summary();
//!     assert_eq!(summary.subtotal, Money::from_cents(4000));
//!
//!     let totals = OrderTotals::compute(summary.subtotal, Money::zero(), Money::zero());
//!     assert_eq!(totals.total.display(), "$43.20");
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod ids;
pub mod money;

pub use error::CommerceError;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    // Errors and values
    pub use crate::error::CommerceError;
    pub use crate::ids::{
        CouponId, LineItemId, OrderId, OrderItemId, ProductId, ShippingMethodId,
    };
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::Product;

    // Cart
    pub use crate::cart::{
        reconcile, tax_rate, validate_cart, AppliedCoupon, CartIssue, CartLineItem, CartStore,
        CartSummary, Coupon, CouponError, DiscountType, OrderTotals, ValidationReport,
        CART_STORAGE_KEY,
    };

    // Checkout
    pub use crate::checkout::{
        cheapest, CardBrand, CardError, CheckoutForm, CheckoutService, CheckoutState, FieldErrors,
        Order, OrderItem, OrderStatus, PaymentStatus, ShippingMethod,
    };

    // Backend port
    pub use crate::backend::{BackendError, BackendResult, CommerceBackend, InMemoryBackend};
}

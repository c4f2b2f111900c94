//! Shopping cart module.
//!
//! Contains the device-persisted cart store, reconciliation against the
//! catalog, order totals, and coupons.

mod coupon;
mod item;
mod pricing;
mod store;
mod validate;

pub use coupon::{AppliedCoupon, Coupon, CouponError, DiscountType};
pub use item::{CartLineItem, CartSummary};
pub use pricing::{tax_rate, OrderTotals};
pub use store::{CartStore, CART_STORAGE_KEY};
pub use validate::{reconcile, validate_cart, CartIssue, ValidationReport};

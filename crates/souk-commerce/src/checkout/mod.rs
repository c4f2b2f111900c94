//! Checkout module.
//!
//! Contains the payment form, card checks, shipping methods, order records,
//! and the service that turns a cart into an order.

mod card;
mod form;
mod order;
mod service;
mod shipping;

pub use card::{
    last_four, luhn_check, normalize_number, validate_cardholder_name, validate_cvv,
    validate_expiry, validate_number, CardBrand, CardError,
};
pub use form::{CheckoutForm, FieldErrors};
pub use order::{Order, OrderItem, OrderStatus, PaymentStatus};
pub use service::{CheckoutService, CheckoutState};
pub use shipping::{cheapest, ShippingMethod};

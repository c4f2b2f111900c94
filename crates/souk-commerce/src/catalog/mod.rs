//! Product catalog module.
//!
//! Contains the product record carts snapshot and checkout validates
//! against.

mod product;

pub use product::Product;

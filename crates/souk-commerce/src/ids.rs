//! Strongly-typed identifiers for commerce entities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to define a strongly-typed ID.
macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a new unique ID.
            pub fn generate() -> Self {
                Self(generate_id())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId, "Unique identifier for a product.");
define_id!(LineItemId, "Unique identifier for a cart line item.");
define_id!(CouponId, "Unique identifier for a coupon.");
define_id!(ShippingMethodId, "Unique identifier for a shipping method.");
define_id!(OrderId, "Unique identifier for an order.");
define_id!(OrderItemId, "Unique identifier for an order line item.");

/// Generate a timestamp-based unique ID.
fn generate_id() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let counter = COUNTER.fetch_add(1, Ordering::SeqCst);

    format!("{:x}-{:x}", timestamp, counter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("prod_123");
        assert_eq!(id.as_str(), "prod_123");
    }

    #[test]
    fn test_id_generation() {
        let id1 = OrderId::generate();
        let id2 = OrderId::generate();
        assert_ne!(id1, id2);
        assert!(!id1.as_str().is_empty());
    }

    #[test]
    fn test_id_from_string() {
        let id: LineItemId = "item_42".into();
        assert_eq!(id.as_str(), "item_42");

        let id: LineItemId = String::from("item_43").into();
        assert_eq!(id.as_str(), "item_43");
    }

    #[test]
    fn test_id_display() {
        let id = CouponId::new("coup_7");
        assert_eq!(format!("{}", id), "coup_7");
    }

    #[test]
    fn test_id_equality() {
        let a = ProductId::new("same");
        let b = ProductId::new("same");
        let c = ProductId::new("different");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}

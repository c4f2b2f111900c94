//! Shipping methods.

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::ShippingMethodId;
use crate::money::Money;

/// A way to ship an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingMethod {
    /// Unique method identifier.
    pub id: ShippingMethodId,
    /// Display name, e.g. "Standard Shipping".
    pub name: String,
    /// Arabic display name.
    pub name_ar: Option<String>,
    /// Longer description shown under the name.
    pub description: Option<String>,
    /// Flat price for this method.
    pub price: Money,
    /// Fastest expected delivery, in days.
    pub estimated_days_min: Option<i32>,
    /// Slowest expected delivery, in days.
    pub estimated_days_max: Option<i32>,
    /// Whether the method is offered at checkout.
    pub is_active: bool,
}

impl ShippingMethod {
    /// Create an active shipping method.
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Self {
            id: ShippingMethodId::generate(),
            name: name.into(),
            name_ar: None,
            description: None,
            price,
            estimated_days_min: None,
            estimated_days_max: None,
            is_active: true,
        }
    }

    /// Set the Arabic name.
    pub fn with_arabic_name(mut self, name_ar: impl Into<String>) -> Self {
        self.name_ar = Some(name_ar.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the expected delivery window in days.
    pub fn with_delivery_days(mut self, min: i32, max: i32) -> Self {
        self.estimated_days_min = Some(min);
        self.estimated_days_max = Some(max);
        self
    }

    /// Hide the method from checkout.
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Human-readable delivery estimate, like "3-5 days".
    pub fn delivery_estimate(&self) -> Option<String> {
        match (self.estimated_days_min, self.estimated_days_max) {
            (Some(min), Some(max)) if min == max => Some(format!("{} days", min)),
            (Some(min), Some(max)) => Some(format!("{}-{} days", min, max)),
            (Some(min), None) => Some(format!("{}+ days", min)),
            (None, Some(max)) => Some(format!("Up to {} days", max)),
            (None, None) => None,
        }
    }

    /// Whether shipping costs nothing.
    pub fn is_free(&self) -> bool {
        self.price.is_zero()
    }

    /// Validate invariants before the record enters the system.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.name.trim().is_empty() {
            return Err(CommerceError::Validation(
                "shipping method name is empty".to_string(),
            ));
        }
        if self.price.is_negative() {
            return Err(CommerceError::Validation(
                "shipping method price is negative".to_string(),
            ));
        }
        if let (Some(min), Some(max)) = (self.estimated_days_min, self.estimated_days_max) {
            if min > max {
                return Err(CommerceError::Validation(
                    "shipping delivery window is inverted".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Default selection from a listing: the cheapest active method.
pub fn cheapest(methods: &[ShippingMethod]) -> Option<&ShippingMethod> {
    methods
        .iter()
        .filter(|method| method.is_active)
        .min_by_key(|method| method.price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_estimate() {
        let same = ShippingMethod::new("Express", Money::from_major(15)).with_delivery_days(2, 2);
        assert_eq!(same.delivery_estimate().as_deref(), Some("2 days"));

        let window =
            ShippingMethod::new("Standard", Money::from_major(5)).with_delivery_days(3, 7);
        assert_eq!(window.delivery_estimate().as_deref(), Some("3-7 days"));

        let unknown = ShippingMethod::new("Carrier Pigeon", Money::from_major(1));
        assert_eq!(unknown.delivery_estimate(), None);
    }

    #[test]
    fn test_free_shipping() {
        let free = ShippingMethod::new("Local Pickup", Money::zero());
        assert!(free.is_free());
        assert!(!ShippingMethod::new("Standard", Money::from_major(5)).is_free());
    }

    #[test]
    fn test_cheapest_skips_inactive() {
        let methods = vec![
            ShippingMethod::new("Express", Money::from_major(15)),
            ShippingMethod::new("Secret Deal", Money::from_major(1)).inactive(),
            ShippingMethod::new("Standard", Money::from_major(5)),
        ];

        let pick = cheapest(&methods).unwrap();
        assert_eq!(pick.name, "Standard");
    }

    #[test]
    fn test_cheapest_of_none() {
        assert!(cheapest(&[]).is_none());
        let only_inactive = vec![ShippingMethod::new("Hidden", Money::zero()).inactive()];
        assert!(cheapest(&only_inactive).is_none());
    }

    #[test]
    fn test_validate_rejects_bad_records() {
        assert!(ShippingMethod::new("OK", Money::from_major(5))
            .validate()
            .is_ok());
        assert!(ShippingMethod::new(" ", Money::from_major(5))
            .validate()
            .is_err());
        assert!(ShippingMethod::new("Inverted", Money::from_major(5))
            .with_delivery_days(7, 3)
            .validate()
            .is_err());
    }
}

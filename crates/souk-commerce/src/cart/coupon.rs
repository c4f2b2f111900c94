//! Coupon records and discount evaluation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::CommerceError;
use crate::ids::CouponId;
use crate::money::Money;

/// How a coupon's value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// `discount_value` is a percentage of the order amount.
    Percentage,
    /// `discount_value` is a flat amount in the store currency.
    Fixed,
}

/// Why a coupon cannot be applied.
///
/// Checks run in a fixed order, so a coupon that is both expired and below
/// minimum always reports `Expired`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CouponError {
    /// No active coupon matches the code.
    #[error("Invalid coupon code")]
    NotFound,
    /// The coupon's expiry date has passed.
    #[error("This coupon has expired")]
    Expired,
    /// Every allowed redemption has been used.
    #[error("This coupon has reached its usage limit")]
    MaxUsesReached,
    /// The order subtotal is below the coupon's minimum.
    #[error("Minimum order amount is {minimum}")]
    BelowMinimum { minimum: Money },
}

/// A discount rule looked up by code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coupon {
    /// Unique coupon identifier.
    pub id: CouponId,
    /// Code shoppers enter; matching is case-insensitive.
    pub code: String,
    /// How `discount_value` is interpreted.
    pub discount_type: DiscountType,
    /// Percentage (0-100) or flat amount, per `discount_type`.
    pub discount_value: Decimal,
    /// Smallest order amount the coupon applies to.
    pub min_order_amount: Option<Money>,
    /// Total allowed redemptions. `None` means unlimited.
    pub max_uses: Option<i64>,
    /// Redemptions so far.
    pub current_uses: i64,
    /// When the coupon stops working.
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether the coupon can be found at all.
    pub is_active: bool,
    /// When the coupon was created.
    pub created_at: DateTime<Utc>,
}

impl Coupon {
    /// Create an active percentage coupon.
    pub fn percentage(code: impl Into<String>, percent: i64) -> Self {
        Self::with_type(code, DiscountType::Percentage, Decimal::from(percent))
    }

    /// Create an active fixed-amount coupon.
    pub fn fixed(code: impl Into<String>, amount: Money) -> Self {
        Self::with_type(code, DiscountType::Fixed, amount.amount())
    }

    fn with_type(code: impl Into<String>, discount_type: DiscountType, value: Decimal) -> Self {
        Self {
            id: CouponId::generate(),
            code: code.into(),
            discount_type,
            discount_value: value,
            min_order_amount: None,
            max_uses: None,
            current_uses: 0,
            expires_at: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Require a minimum order amount.
    pub fn with_minimum(mut self, minimum: Money) -> Self {
        self.min_order_amount = Some(minimum);
        self
    }

    /// Cap the number of redemptions.
    pub fn with_max_uses(mut self, max_uses: i64) -> Self {
        self.max_uses = Some(max_uses);
        self
    }

    /// Set an expiry date.
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Deactivate the coupon.
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Canonical form of a code for lookup.
    pub fn normalize(code: &str) -> String {
        code.trim().to_uppercase()
    }

    /// Whether the given code matches this coupon.
    pub fn matches(&self, code: &str) -> bool {
        Self::normalize(&self.code) == Self::normalize(code)
    }

    /// Whether the expiry date has passed.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at < Utc::now(),
            None => false,
        }
    }

    /// Whether every allowed redemption has been used.
    pub fn is_exhausted(&self) -> bool {
        match self.max_uses {
            Some(max_uses) => self.current_uses >= max_uses,
            None => false,
        }
    }

    /// Record one redemption.
    pub fn record_usage(&mut self) {
        self.current_uses += 1;
    }

    /// Run the eligibility checks in order and compute the discount.
    ///
    /// The returned discount never exceeds `order_amount`.
    pub fn evaluate(&self, order_amount: Money) -> Result<AppliedCoupon, CouponError> {
        if !self.is_active {
            return Err(CouponError::NotFound);
        }
        if self.is_expired() {
            return Err(CouponError::Expired);
        }
        if self.is_exhausted() {
            return Err(CouponError::MaxUsesReached);
        }
        if let Some(minimum) = self.min_order_amount {
            if order_amount < minimum {
                return Err(CouponError::BelowMinimum { minimum });
            }
        }

        let raw = match self.discount_type {
            DiscountType::Percentage => order_amount.percentage(self.discount_value),
            DiscountType::Fixed => Money::new(self.discount_value),
        };
        Ok(AppliedCoupon {
            coupon: self.clone(),
            discount_amount: raw.min(order_amount),
        })
    }

    /// Validate invariants before the record enters the system.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.code.trim().is_empty() {
            return Err(CommerceError::Validation("coupon code is empty".to_string()));
        }
        if self.discount_value < Decimal::ZERO {
            return Err(CommerceError::Validation(
                "coupon discount value is negative".to_string(),
            ));
        }
        if let Some(minimum) = self.min_order_amount {
            if minimum.is_negative() {
                return Err(CommerceError::Validation(
                    "coupon minimum order amount is negative".to_string(),
                ));
            }
        }
        if let Some(max_uses) = self.max_uses {
            if max_uses < 0 {
                return Err(CommerceError::Validation(
                    "coupon max uses is negative".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// A coupon attached to the current checkout session.
///
/// Lives in memory only. Removing a coupon is a plain drop of this value;
/// nothing needs undoing in storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedCoupon {
    /// The coupon as it was when applied.
    pub coupon: Coupon,
    /// Discount computed against the order amount at apply time.
    pub discount_amount: Money,
}

impl AppliedCoupon {
    /// The applied coupon's code.
    pub fn code(&self) -> &str {
        &self.coupon.code
    }
}

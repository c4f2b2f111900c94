//! Product records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;

/// A product in the catalog.
///
/// The authoritative copy lives in the backing store. Carts embed a snapshot
/// taken at add time, which reconciliation later compares against the
/// authoritative record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Arabic display name.
    pub name_ar: Option<String>,
    /// Long-form description.
    pub description: Option<String>,
    /// Arabic description.
    pub description_ar: Option<String>,
    /// Current selling price.
    pub price: Money,
    /// Pre-sale price, present when the product is discounted.
    pub original_price: Option<Money>,
    /// Units currently on hand.
    pub stock_quantity: i64,
    /// Category slug.
    pub category: String,
    /// Image URLs, first one is the cover.
    pub images: Vec<String>,
    /// Search and filter tags.
    pub tags: Vec<String>,
    /// Whether the product is purchasable.
    pub is_active: bool,
    /// Whether the product is featured on the home page.
    pub is_featured: bool,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Create an active product with the given name and price.
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        let now = Utc::now();
        Self {
            id: ProductId::generate(),
            name: name.into(),
            name_ar: None,
            description: None,
            description_ar: None,
            price,
            original_price: None,
            stock_quantity: 0,
            category: String::new(),
            images: Vec::new(),
            tags: Vec::new(),
            is_active: true,
            is_featured: false,
            created_at: now,
            updated_at: now,
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

    /// Set the stock on hand.
    pub fn with_stock(mut self, quantity: i64) -> Self {
        self.stock_quantity = quantity;
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the pre-sale price.
    pub fn with_original_price(mut self, original: Money) -> Self {
        self.original_price = Some(original);
        self
    }

    /// Add a tag if not already present.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    /// Mark the product as featured.
    pub fn featured(mut self) -> Self {
        self.is_featured = true;
        self
    }

    /// Mark the product as not purchasable.
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Check if the product can currently be sold.
    pub fn is_available(&self) -> bool {
        self.is_active
    }

    /// Check if any stock remains.
    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    /// Check if the product is on sale.
    pub fn is_on_sale(&self) -> bool {
        match self.original_price {
            Some(original) => original > self.price,
            None => false,
        }
    }

    /// Discount off the original price, as a percentage.
    pub fn discount_percentage(&self) -> Option<Decimal> {
        match self.original_price {
            Some(original) if original > self.price && original.is_positive() => {
                let saved = original - self.price;
                Some(saved.amount() / original.amount() * Decimal::from(100))
            }
            _ => None,
        }
    }

    /// Validate invariants before the record enters the system.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.id.as_str().is_empty() {
            return Err(CommerceError::Validation("product id is empty".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(CommerceError::Validation(
                "product name is empty".to_string(),
            ));
        }
        if self.price.is_negative() {
            return Err(CommerceError::Validation(
                "product price is negative".to_string(),
            ));
        }
        if let Some(original) = self.original_price {
            if original.is_negative() {
                return Err(CommerceError::Validation(
                    "product original price is negative".to_string(),
                ));
            }
        }
        if self.stock_quantity < 0 {
            return Err(CommerceError::Validation(
                "product stock quantity is negative".to_string(),
            ));
        }
        Ok(())
    }
}

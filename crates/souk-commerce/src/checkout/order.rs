//! Order records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::{CartLineItem, OrderTotals};
use crate::checkout::card::{self, CardBrand};
use crate::checkout::form::CheckoutForm;
use crate::ids::{OrderId, OrderItemId, ProductId};
use crate::money::Money;

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, payment confirmed.
    #[default]
    Confirmed,
    /// Being picked and packed.
    Processing,
    /// Handed to the carrier.
    Shipped,
    /// Received by the customer.
    Delivered,
    /// Cancelled before shipment.
    Cancelled,
}

impl OrderStatus {
    /// Get the status as a string slug.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Human-readable status name.
    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

/// Payment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Refunded,
}

impl PaymentStatus {
    /// Get the status as a string slug.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

/// A placed order.
///
/// Written once at checkout; only `status` moves afterwards. Card data is
/// reduced to brand and last four digits before it gets here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Human-readable order number.
    pub order_number: String,
    /// Customer's full name.
    pub customer_name: String,
    /// Customer's email.
    pub customer_email: String,
    /// Customer's phone number.
    pub customer_phone: String,
    /// Single-line shipping address.
    pub shipping_address: String,
    /// Payment method label.
    pub payment_method: String,
    /// Detected card brand.
    pub card_brand: Option<CardBrand>,
    /// Last four digits of the card.
    pub card_last_four: String,
    /// Sum of line totals.
    pub subtotal: Money,
    /// Coupon discount taken off the subtotal.
    pub discount_amount: Money,
    /// Shipping cost for the selected method.
    pub shipping_cost: Money,
    /// Tax charged.
    pub tax_amount: Money,
    /// Final amount charged.
    pub total_amount: Money,
    /// Code of the applied coupon, if any.
    pub coupon_code: Option<String>,
    /// Name of the selected shipping method.
    pub shipping_method: String,
    /// Order lifecycle status.
    pub status: OrderStatus,
    /// Payment state.
    pub payment_status: PaymentStatus,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Assemble an order from a validated form, computed totals, and the
    /// checkout selections.
    pub fn new(
        form: &CheckoutForm,
        totals: OrderTotals,
        coupon_code: Option<String>,
        shipping_method: impl Into<String>,
    ) -> Self {
        let digits = card::normalize_number(&form.card_number);
        Self {
            id: OrderId::generate(),
            order_number: Self::generate_order_number(),
            customer_name: form.full_name(),
            customer_email: form.email.trim().to_string(),
            customer_phone: form.phone.trim().to_string(),
            shipping_address: form.combined_address(),
            payment_method: "credit_card".to_string(),
            card_brand: CardBrand::detect(&digits),
            card_last_four: card::last_four(&digits),
            subtotal: totals.subtotal,
            discount_amount: totals.discount,
            shipping_cost: totals.shipping,
            tax_amount: totals.tax,
            total_amount: totals.total,
            coupon_code,
            shipping_method: shipping_method.into(),
            status: OrderStatus::Confirmed,
            payment_status: PaymentStatus::Paid,
            created_at: Utc::now(),
        }
    }

    /// Generate a human-readable order number.
    pub fn generate_order_number() -> String {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        format!("ORD-{}", timestamp)
    }

    /// Move the order to a new lifecycle status.
    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    /// Whether payment has settled.
    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}

/// One purchased line, denormalized for order history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Unique item identifier.
    pub id: OrderItemId,
    /// Order this line belongs to.
    pub order_id: OrderId,
    /// Product purchased.
    pub product_id: ProductId,
    /// Product name at purchase time.
    pub product_name: String,
    /// Units purchased.
    pub quantity: i64,
    /// Unit price at purchase time.
    pub price: Money,
}

impl OrderItem {
    /// Build order lines from the cart rows being checked out.
    pub fn from_cart(order_id: &OrderId, items: &[CartLineItem]) -> Vec<OrderItem> {
        items
            .iter()
            .map(|item| OrderItem {
                id: OrderItemId::generate(),
                order_id: order_id.clone(),
                product_id: item.product_id.clone(),
                product_name: item.product.name.clone(),
                quantity: item.quantity,
                price: item.price,
            })
            .collect()
    }

    /// Line total: unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

//! Checkout orchestration.

use std::sync::Arc;

use souk_storage::StorageBackend;
use tracing::{error, info, warn};

use crate::backend::CommerceBackend;
use crate::cart::{validate_cart, AppliedCoupon, CartStore, CouponError, OrderTotals};
use crate::checkout::form::CheckoutForm;
use crate::checkout::order::{Order, OrderItem};
use crate::checkout::shipping::ShippingMethod;
use crate::error::CommerceError;
use crate::ids::OrderId;
use crate::money::Money;

/// Message shown when the backing store fails mid-checkout.
const SUBMIT_FAILED: &str = "Something went wrong placing your order. Please try again.";

/// State of a single checkout attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutState {
    /// No submission in flight.
    Idle,
    /// Re-validating the cart and form before anything is written.
    Validating,
    /// Writing the order to the backing store.
    Submitting,
    /// Order placed and cart cleared.
    Succeeded { order_id: OrderId },
    /// Submission rejected or failed; the cart is untouched.
    Failed { errors: Vec<String> },
}

impl CheckoutState {
    /// Whether the attempt has finished, either way.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CheckoutState::Succeeded { .. } | CheckoutState::Failed { .. }
        )
    }
}

/// Drives a cart through validation and atomic order placement.
///
/// The service owns the checkout session's transient choices: the applied
/// coupon and the selected shipping method. Nothing it holds is persisted;
/// dropping the service abandons the session and loses nothing but those
/// choices.
pub struct CheckoutService<S: StorageBackend, B: CommerceBackend> {
    cart: CartStore<S>,
    backend: Arc<B>,
    state: CheckoutState,
    coupon: Option<AppliedCoupon>,
    shipping: Option<ShippingMethod>,
}

impl<S: StorageBackend, B: CommerceBackend> CheckoutService<S, B> {
    /// Create a service over a cart and a backing store.
    pub fn new(cart: CartStore<S>, backend: Arc<B>) -> Self {
        Self {
            cart,
            backend,
            state: CheckoutState::Idle,
            coupon: None,
            shipping: None,
        }
    }

    /// Current state of the attempt.
    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// The cart this checkout drains.
    pub fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    /// The coupon currently applied, if any.
    pub fn coupon(&self) -> Option<&AppliedCoupon> {
        self.coupon.as_ref()
    }

    /// The shipping method currently selected, if any.
    pub fn shipping(&self) -> Option<&ShippingMethod> {
        self.shipping.as_ref()
    }

    /// Apply a coupon code against the current cart subtotal.
    ///
    /// The discount is computed once, here; it is not recomputed if the cart
    /// changes afterwards.
    pub async fn apply_coupon(&mut self, code: &str) -> Result<AppliedCoupon, CommerceError> {
        let subtotal = self.cart.summary().subtotal;
        let coupon = self
            .backend
            .find_active_coupon(code)
            .await?
            .ok_or(CouponError::NotFound)?;
        let applied = coupon.evaluate(subtotal)?;

        info!(code = %applied.coupon.code, discount = %applied.discount_amount, "coupon applied");
        self.coupon = Some(applied.clone());
        Ok(applied)
    }

    /// Drop the applied coupon. Purely local; nothing to undo elsewhere.
    pub fn remove_coupon(&mut self) {
        self.coupon = None;
    }

    /// Active shipping methods, cheapest first. Preselects the cheapest when
    /// nothing is selected yet.
    pub async fn load_shipping_methods(&mut self) -> Result<Vec<ShippingMethod>, CommerceError> {
        let methods = self.backend.active_shipping_methods().await?;
        if self.shipping.is_none() {
            self.shipping = methods.first().cloned();
        }
        Ok(methods)
    }

    /// Select a shipping method.
    pub fn select_shipping(&mut self, method: ShippingMethod) {
        self.shipping = Some(method);
    }

    /// Totals for the current cart, coupon, and shipping selection.
    pub fn totals(&self) -> OrderTotals {
        let subtotal = self.cart.summary().subtotal;
        let discount = self
            .coupon
            .as_ref()
            .map(|applied| applied.discount_amount)
            .unwrap_or_else(Money::zero);
        let shipping = self
            .shipping
            .as_ref()
            .map(|method| method.price)
            .unwrap_or_else(Money::zero);
        OrderTotals::compute(subtotal, discount, shipping)
    }

    /// Run the attempt: re-validate everything, then place the order.
    ///
    /// The order, its lines, stock decrements, and the coupon redemption
    /// land in the backing store as one transaction. The cart is cleared
    /// only after that commit succeeds, so no failure path can lose a cart
    /// or strand a half-written order.
    pub async fn submit(&mut self, form: &CheckoutForm) -> CheckoutState {
        self.state = CheckoutState::Validating;

        let items = self.cart.items();
        if items.is_empty() {
            return self.fail(vec![CommerceError::EmptyCart.to_string()]);
        }

        let report = match validate_cart(&self.cart, self.backend.as_ref()).await {
            Ok(report) => report,
            Err(e) => {
                error!(error = %e, "cart validation failed");
                return self.fail(vec![SUBMIT_FAILED.to_string()]);
            }
        };
        if !report.is_valid() {
            return self.fail(report.messages());
        }

        if let Err(field_errors) = form.validate() {
            return self.fail(field_errors.into_values().collect());
        }

        let shipping = match &self.shipping {
            Some(method) => method.clone(),
            None => return self.fail(vec!["Please select a shipping method".to_string()]),
        };

        self.state = CheckoutState::Submitting;

        let subtotal = self.cart.summary().subtotal;
        let discount = self
            .coupon
            .as_ref()
            .map(|applied| applied.discount_amount)
            .unwrap_or_else(Money::zero);
        let totals = OrderTotals::compute(subtotal, discount, shipping.price);
        let coupon_code = self
            .coupon
            .as_ref()
            .map(|applied| applied.code().to_string());

        let order = Order::new(form, totals, coupon_code, shipping.name.clone());
        let order_items = OrderItem::from_cart(&order.id, &items);

        if let Err(e) = self.backend.place_order(&order, &order_items).await {
            error!(error = %e, order_number = %order.order_number, "order placement failed");
            return self.fail(vec![SUBMIT_FAILED.to_string()]);
        }

        // the order is committed; a cart that fails to clear is only cosmetic
        if let Err(e) = self.cart.clear() {
            warn!(error = %e, "cart did not clear after checkout");
        }
        self.coupon = None;

        info!(order_id = %order.id, total = %order.total_amount, "order placed");
        self.state = CheckoutState::Succeeded { order_id: order.id };
        self.state.clone()
    }

    fn fail(&mut self, errors: Vec<String>) -> CheckoutState {
        self.state = CheckoutState::Failed { errors };
        self.state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InMemoryBackend;
    use crate::cart::Coupon;
    use crate::catalog::Product;
    use souk_storage::MemoryBackend;

    fn service_with(
        backend: Arc<InMemoryBackend>,
    ) -> CheckoutService<MemoryBackend, InMemoryBackend> {
        CheckoutService::new(CartStore::new(MemoryBackend::new()), backend)
    }

    #[tokio::test]
    async fn test_totals_track_selections() {
        let backend = Arc::new(InMemoryBackend::new());
        let kufiya = Product::new("Kufiya", Money::from_major(20)).with_stock(10);
        backend.insert_product(kufiya.clone()).unwrap();
        backend
            .insert_coupon(Coupon::percentage("SAVE10", 10))
            .unwrap();
        backend
            .insert_shipping_method(ShippingMethod::new("Standard", Money::from_major(5)))
            .unwrap();

        let mut service = service_with(backend);
        service.cart().add_item(&kufiya, 2).unwrap();

        // subtotal only
        assert_eq!(service.totals().total, Money::from_cents(4320));

        service.apply_coupon("save10").await.unwrap();
        service.load_shipping_methods().await.unwrap();

        let totals = service.totals();
        assert_eq!(totals.discount, Money::from_major(4));
        assert_eq!(totals.shipping, Money::from_major(5));
        assert_eq!(totals.tax, Money::from_cents(328));
        assert_eq!(totals.total, Money::from_cents(4428));

        service.remove_coupon();
        assert_eq!(service.totals().discount, Money::zero());
    }

    #[tokio::test]
    async fn test_apply_coupon_surfaces_eligibility_errors() {
        let backend = Arc::new(InMemoryBackend::new());
        backend
            .insert_coupon(Coupon::percentage("BIG", 10).with_minimum(Money::from_major(50)))
            .unwrap();
        let kufiya = Product::new("Kufiya", Money::from_major(20)).with_stock(10);
        backend.insert_product(kufiya.clone()).unwrap();

        let mut service = service_with(backend);
        service.cart().add_item(&kufiya, 1).unwrap();

        let err = service.apply_coupon("BIG").await.unwrap_err();
        assert_eq!(err.to_string(), "Minimum order amount is $50.00");
        assert!(service.coupon().is_none());

        let err = service.apply_coupon("MISSING").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid coupon code");
    }

    #[tokio::test]
    async fn test_submit_with_empty_cart_fails_fast() {
        let backend = Arc::new(InMemoryBackend::new());
        let mut service = service_with(backend);

        let state = service.submit(&CheckoutForm::default()).await;
        match state {
            CheckoutState::Failed { errors } => {
                assert_eq!(errors, vec!["Cart is empty".to_string()])
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }
}

//! In-memory backend for tests and development.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::backend::{BackendError, BackendResult, CommerceBackend};
use crate::cart::Coupon;
use crate::catalog::Product;
use crate::checkout::{Order, OrderItem, ShippingMethod};
use crate::ids::{OrderId, ProductId};

#[derive(Default)]
struct Inner {
    products: HashMap<ProductId, Product>,
    shipping_methods: Vec<ShippingMethod>,
    coupons: HashMap<String, Coupon>,
    orders: Vec<Order>,
    order_items: Vec<OrderItem>,
}

/// Backing store held entirely in memory.
///
/// `place_order` runs under a single write guard, which gives it the same
/// all-or-nothing behavior a database transaction would: nothing mutates
/// until every referenced record has been checked.
#[derive(Default)]
pub struct InMemoryBackend {
    inner: RwLock<Inner>,
}

impl InMemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed or replace a product. The record is validated first.
    pub fn insert_product(&self, product: Product) -> Result<(), BackendError> {
        product
            .validate()
            .map_err(|e| BackendError::Rejected(e.to_string()))?;
        self.write().products.insert(product.id.clone(), product);
        Ok(())
    }

    /// Seed a shipping method. The record is validated first.
    pub fn insert_shipping_method(&self, method: ShippingMethod) -> Result<(), BackendError> {
        method
            .validate()
            .map_err(|e| BackendError::Rejected(e.to_string()))?;
        self.write().shipping_methods.push(method);
        Ok(())
    }

    /// Seed or replace a coupon, keyed by its normalized code.
    pub fn insert_coupon(&self, coupon: Coupon) -> Result<(), BackendError> {
        coupon
            .validate()
            .map_err(|e| BackendError::Rejected(e.to_string()))?;
        self.write()
            .coupons
            .insert(Coupon::normalize(&coupon.code), coupon);
        Ok(())
    }

    /// Current state of a stored product.
    pub fn product_snapshot(&self, id: &ProductId) -> Option<Product> {
        self.read().products.get(id).cloned()
    }

    /// Current state of a stored coupon.
    pub fn coupon_snapshot(&self, code: &str) -> Option<Coupon> {
        self.read().coupons.get(&Coupon::normalize(code)).cloned()
    }

    /// Number of orders placed.
    pub fn order_count(&self) -> usize {
        self.read().orders.len()
    }

    /// All orders placed so far, oldest first.
    pub fn orders(&self) -> Vec<Order> {
        self.read().orders.clone()
    }

    /// Lines recorded for an order.
    pub fn items_for_order(&self, id: &OrderId) -> Vec<OrderItem> {
        self.read()
            .order_items
            .iter()
            .filter(|item| &item.order_id == id)
            .cloned()
            .collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CommerceBackend for InMemoryBackend {
    async fn product(&self, id: &ProductId) -> BackendResult<Option<Product>> {
        Ok(self.read().products.get(id).cloned())
    }

    async fn products_by_ids(&self, ids: &[ProductId]) -> BackendResult<Vec<Product>> {
        let inner = self.read();
        Ok(ids
            .iter()
            .filter_map(|id| inner.products.get(id).cloned())
            .collect())
    }

    async fn active_shipping_methods(&self) -> BackendResult<Vec<ShippingMethod>> {
        let mut methods: Vec<ShippingMethod> = self
            .read()
            .shipping_methods
            .iter()
            .filter(|method| method.is_active)
            .cloned()
            .collect();
        methods.sort_by_key(|method| method.price);
        Ok(methods)
    }

    async fn find_active_coupon(&self, code: &str) -> BackendResult<Option<Coupon>> {
        Ok(self
            .read()
            .coupons
            .get(&Coupon::normalize(code))
            .filter(|coupon| coupon.is_active)
            .cloned())
    }

    async fn place_order(&self, order: &Order, items: &[OrderItem]) -> BackendResult<()> {
        let mut inner = self.write();

        // check everything before mutating anything
        for item in items {
            if !inner.products.contains_key(&item.product_id) {
                return Err(BackendError::NotFound(format!(
                    "product {}",
                    item.product_id
                )));
            }
        }
        let coupon_key = match &order.coupon_code {
            Some(code) => {
                let key = Coupon::normalize(code);
                if !inner.coupons.contains_key(&key) {
                    return Err(BackendError::NotFound(format!("coupon {}", code)));
                }
                Some(key)
            }
            None => None,
        };

        inner.orders.push(order.clone());
        inner.order_items.extend(items.iter().cloned());
        for item in items {
            if let Some(product) = inner.products.get_mut(&item.product_id) {
                product.stock_quantity = (product.stock_quantity - item.quantity).max(0);
            }
        }
        if let Some(key) = coupon_key {
            if let Some(coupon) = inner.coupons.get_mut(&key) {
                coupon.record_usage();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartLineItem, OrderTotals};
    use crate::checkout::CheckoutForm;
    use crate::money::Money;

    fn checkout_form() -> CheckoutForm {
        CheckoutForm {
            first_name: "Amal".to_string(),
            last_name: "Nasser".to_string(),
            email: "amal@example.com".to_string(),
            phone: "+970591234567".to_string(),
            address: "12 Old City Road".to_string(),
            city: "Ramallah".to_string(),
            state: String::new(),
            zip_code: "90100".to_string(),
            country: "Palestine".to_string(),
            card_number: "4242424242424242".to_string(),
            expiry_date: "12/30".to_string(),
            cvv: "123".to_string(),
            cardholder_name: "Amal Nasser".to_string(),
        }
    }

    fn order_for(items: &[CartLineItem], coupon_code: Option<&str>) -> (Order, Vec<OrderItem>) {
        let subtotal: Money = items.iter().map(|item| item.line_total()).sum();
        let totals = OrderTotals::compute(subtotal, Money::zero(), Money::zero());
        let order = Order::new(
            &checkout_form(),
            totals,
            coupon_code.map(|c| c.to_string()),
            "Standard",
        );
        let order_items = OrderItem::from_cart(&order.id, items);
        (order, order_items)
    }

    #[tokio::test]
    async fn test_insert_validates_records() {
        let backend = InMemoryBackend::new();
        let bad = Product::new("  ", Money::from_cents(100));
        assert!(matches!(
            backend.insert_product(bad),
            Err(BackendError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn test_product_lookups() {
        let backend = InMemoryBackend::new();
        let kufiya = Product::new("Kufiya", Money::from_cents(2000)).with_stock(5);
        let scarf = Product::new("Scarf", Money::from_cents(1500)).with_stock(3);
        backend.insert_product(kufiya.clone()).unwrap();
        backend.insert_product(scarf.clone()).unwrap();

        assert_eq!(backend.product(&kufiya.id).await.unwrap(), Some(kufiya.clone()));
        assert_eq!(
            backend.product(&ProductId::new("missing")).await.unwrap(),
            None
        );

        let found = backend
            .products_by_ids(&[kufiya.id.clone(), ProductId::new("missing"), scarf.id.clone()])
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn test_shipping_methods_sorted_and_filtered() {
        let backend = InMemoryBackend::new();
        backend
            .insert_shipping_method(ShippingMethod::new("Express", Money::from_major(15)))
            .unwrap();
        backend
            .insert_shipping_method(ShippingMethod::new("Standard", Money::from_major(5)))
            .unwrap();
        backend
            .insert_shipping_method(
                ShippingMethod::new("Retired", Money::from_major(1)).inactive(),
            )
            .unwrap();

        let methods = backend.active_shipping_methods().await.unwrap();
        let names: Vec<&str> = methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Standard", "Express"]);
    }

    #[tokio::test]
    async fn test_coupon_lookup_is_case_insensitive() {
        let backend = InMemoryBackend::new();
        backend
            .insert_coupon(Coupon::percentage("Save10", 10))
            .unwrap();
        backend
            .insert_coupon(Coupon::percentage("HIDDEN", 10).inactive())
            .unwrap();

        let found = backend.find_active_coupon("  save10 ").await.unwrap();
        assert_eq!(found.unwrap().code, "Save10");

        assert!(backend.find_active_coupon("hidden").await.unwrap().is_none());
        assert!(backend.find_active_coupon("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_place_order_commits_all_side_effects() {
        let backend = InMemoryBackend::new();
        let kufiya = Product::new("Kufiya", Money::from_cents(2000)).with_stock(10);
        backend.insert_product(kufiya.clone()).unwrap();
        backend
            .insert_coupon(Coupon::percentage("SAVE10", 10))
            .unwrap();

        let rows = vec![CartLineItem::new(kufiya.clone(), 2)];
        let (order, items) = order_for(&rows, Some("SAVE10"));

        backend.place_order(&order, &items).await.unwrap();

        assert_eq!(backend.order_count(), 1);
        assert_eq!(backend.items_for_order(&order.id).len(), 1);
        assert_eq!(
            backend.product_snapshot(&kufiya.id).unwrap().stock_quantity,
            8
        );
        assert_eq!(backend.coupon_snapshot("SAVE10").unwrap().current_uses, 1);
    }

    #[tokio::test]
    async fn test_place_order_floors_stock_at_zero() {
        let backend = InMemoryBackend::new();
        let scarce = Product::new("Scarce", Money::from_cents(1000)).with_stock(1);
        backend.insert_product(scarce.clone()).unwrap();

        // quantity raced past stock between validation and commit
        let rows = vec![CartLineItem::new(scarce.clone(), 3)];
        let (order, items) = order_for(&rows, None);
        backend.place_order(&order, &items).await.unwrap();

        assert_eq!(
            backend.product_snapshot(&scarce.id).unwrap().stock_quantity,
            0
        );
    }

    #[tokio::test]
    async fn test_place_order_rejects_unknown_records_without_mutating() {
        let backend = InMemoryBackend::new();
        let kufiya = Product::new("Kufiya", Money::from_cents(2000)).with_stock(10);
        backend.insert_product(kufiya.clone()).unwrap();

        let ghost = Product::new("Ghost", Money::from_cents(500)).with_stock(5);
        let rows = vec![
            CartLineItem::new(kufiya.clone(), 1),
            CartLineItem::new(ghost, 1),
        ];
        let (order, items) = order_for(&rows, None);

        let err = backend.place_order(&order, &items).await.unwrap_err();
        assert!(matches!(err, BackendError::NotFound(_)));

        // nothing landed
        assert_eq!(backend.order_count(), 0);
        assert_eq!(
            backend.product_snapshot(&kufiya.id).unwrap().stock_quantity,
            10
        );
    }

    #[tokio::test]
    async fn test_place_order_with_unknown_coupon_rolls_back() {
        let backend = InMemoryBackend::new();
        let kufiya = Product::new("Kufiya", Money::from_cents(2000)).with_stock(10);
        backend.insert_product(kufiya.clone()).unwrap();

        let rows = vec![CartLineItem::new(kufiya.clone(), 1)];
        let (order, items) = order_for(&rows, Some("VANISHED"));

        assert!(backend.place_order(&order, &items).await.is_err());
        assert_eq!(backend.order_count(), 0);
        assert_eq!(
            backend.product_snapshot(&kufiya.id).unwrap().stock_quantity,
            10
        );
    }
}

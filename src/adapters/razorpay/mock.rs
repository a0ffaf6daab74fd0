//! In-memory payment gateway for testing.
//!
//! Orders created through the mock are held in memory and returned by
//! `fetch_order`. Tests can pre-register orders with arbitrary charged
//! amounts to exercise the amount-match path, or script failures.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{GatewayError, GatewayOrder, PaymentGateway};

/// Mock payment gateway.
///
/// `create_order` assigns sequential `order_mock_N` references and
/// records the order as `created`. Tests can override the stored state
/// with `put_order` (e.g. to simulate a completed payment with a
/// different charged amount).
#[derive(Debug, Default)]
pub struct MockPaymentGateway {
    orders: Mutex<HashMap<String, GatewayOrder>>,
    next_ref: AtomicU64,
    /// Optional error to return from all calls (for error testing)
    force_error: Mutex<Option<GatewayError>>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-registers an order with the given charged state.
    pub fn with_order(self, order: GatewayOrder) -> Self {
        self.orders.lock().unwrap().insert(order.id.clone(), order);
        self
    }

    /// Forces all calls to return the specified error.
    pub fn with_error(self, error: GatewayError) -> Self {
        *self.force_error.lock().unwrap() = Some(error);
        self
    }

    /// Overwrites or inserts an order at runtime.
    pub fn put_order(&self, order: GatewayOrder) {
        self.orders.lock().unwrap().insert(order.id.clone(), order);
    }

    /// Marks an existing order as paid with the given charged amount.
    pub fn settle_order(&self, order_ref: &str, charged_amount: i64) {
        let mut orders = self.orders.lock().unwrap();
        if let Some(order) = orders.get_mut(order_ref) {
            order.amount = charged_amount;
            order.status = "paid".to_string();
        }
    }

    /// Returns the number of orders created or registered.
    pub fn order_count(&self) -> usize {
        self.orders.lock().unwrap().len()
    }

    fn forced_error(&self) -> Option<GatewayError> {
        self.force_error.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, GatewayError> {
        if let Some(error) = self.forced_error() {
            return Err(error);
        }

        let n = self.next_ref.fetch_add(1, Ordering::SeqCst) + 1;
        let order = GatewayOrder {
            id: format!("order_mock_{}", n),
            amount,
            currency: currency.to_string(),
            receipt: Some(receipt.to_string()),
            status: "created".to_string(),
        };

        self.orders
            .lock()
            .unwrap()
            .insert(order.id.clone(), order.clone());

        Ok(order)
    }

    async fn fetch_order(&self, order_ref: &str) -> Result<GatewayOrder, GatewayError> {
        if let Some(error) = self.forced_error() {
            return Err(error);
        }

        self.orders
            .lock()
            .unwrap()
            .get(order_ref)
            .cloned()
            .ok_or_else(|| GatewayError::Rejected(format!("No such order: {}", order_ref)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_fetch_round_trips() {
        let gateway = MockPaymentGateway::new();

        let created = gateway.create_order(4900, "INR", "receipt_1").await.unwrap();
        let fetched = gateway.fetch_order(&created.id).await.unwrap();

        assert_eq!(fetched.amount, 4900);
        assert_eq!(fetched.currency, "INR");
        assert_eq!(fetched.status, "created");
    }

    #[tokio::test]
    async fn settle_order_updates_charged_amount_and_status() {
        let gateway = MockPaymentGateway::new();

        let created = gateway.create_order(4900, "INR", "receipt_1").await.unwrap();
        gateway.settle_order(&created.id, 4901);

        let fetched = gateway.fetch_order(&created.id).await.unwrap();
        assert_eq!(fetched.amount, 4901);
        assert_eq!(fetched.status, "paid");
    }

    #[tokio::test]
    async fn fetch_unknown_order_is_rejected() {
        let gateway = MockPaymentGateway::new();

        let result = gateway.fetch_order("order_nope").await;

        assert!(matches!(result, Err(GatewayError::Rejected(_))));
    }

    #[tokio::test]
    async fn forced_error_fails_all_calls() {
        let gateway = MockPaymentGateway::new()
            .with_error(GatewayError::Unavailable("gateway down".to_string()));

        assert!(gateway.create_order(4900, "INR", "r").await.is_err());
        assert!(gateway.fetch_order("order_mock_1").await.is_err());
    }

    #[tokio::test]
    async fn order_refs_are_sequential() {
        let gateway = MockPaymentGateway::new();

        let a = gateway.create_order(100, "INR", "r1").await.unwrap();
        let b = gateway.create_order(200, "INR", "r2").await.unwrap();

        assert_eq!(a.id, "order_mock_1");
        assert_eq!(b.id, "order_mock_2");
        assert_eq!(gateway.order_count(), 2);
    }
}

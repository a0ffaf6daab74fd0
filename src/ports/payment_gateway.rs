//! Payment gateway port.
//!
//! Two calls only: create an order for a fixed amount, and re-fetch an
//! order by reference to learn the amount the gateway actually charged.
//! The fetched amount is the sole authority during subscription
//! completion; no callback signature is verified.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An order as the gateway reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    /// Gateway-assigned order reference.
    pub id: String,

    /// Amount in minor units (paise).
    pub amount: i64,

    /// ISO currency code.
    pub currency: String,

    /// Caller-supplied receipt reference.
    pub receipt: Option<String>,

    /// Gateway-side order status (`created`, `paid`, ...).
    pub status: String,
}

/// Errors from the payment gateway.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The gateway rejected the request.
    #[error("gateway rejected request: {0}")]
    Rejected(String),

    /// The gateway could not be reached or returned a malformed response.
    #[error("gateway unavailable: {0}")]
    Unavailable(String),
}

/// Creates orders and fetches their charged state.
///
/// # Contract
///
/// Implementations must:
/// - Report transport failures and malformed responses as
///   `GatewayError::Unavailable`; callers map this to a 503, they never
///   retry
/// - Return the order exactly as the gateway reports it; amount
///   comparison happens in the domain
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create an order for `amount` minor units of `currency`.
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, GatewayError>;

    /// Fetch an existing order by its gateway reference.
    async fn fetch_order(&self, order_ref: &str) -> Result<GatewayOrder, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_gateway_is_object_safe_and_send_sync() {
        fn _assert_trait_object(_: &dyn PaymentGateway) {}
        fn _assert_arc_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_arc_send_sync::<std::sync::Arc<dyn PaymentGateway>>();
    }

    #[test]
    fn gateway_order_deserializes_from_gateway_json() {
        let json = r#"{
            "id": "order_9A33XWu170gUtm",
            "amount": 4900,
            "currency": "INR",
            "receipt": "receipt_1700000000000",
            "status": "paid"
        }"#;

        let order: GatewayOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, "order_9A33XWu170gUtm");
        assert_eq!(order.amount, 4900);
        assert_eq!(order.currency, "INR");
        assert_eq!(order.status, "paid");
    }
}

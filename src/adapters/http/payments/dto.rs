//! HTTP DTOs for the payment endpoints.

use serde::{Deserialize, Serialize};

use super::super::auth::AccountResponse;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create a payment order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Plan identifier; unknown or absent falls back to the default plan.
    #[serde(default)]
    pub plan_id: Option<String>,
}

/// Request to complete a subscription purchase.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteSubscriptionRequest {
    pub plan_id: String,
    /// Gateway order reference from order creation.
    pub order_id: String,
    /// Gateway payment reference.
    pub payment_id: String,
    /// Gateway confirmation signature. Accepted and ignored.
    #[serde(default)]
    pub signature: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for order creation, shaped for the checkout frontend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderData {
    pub order_id: String,
    /// Amount in minor units (paise).
    pub amount: i64,
    pub currency: String,
    pub receipt: Option<String>,
    /// The plan this order prices.
    pub plan_id: String,
    /// Public gateway key for opening checkout.
    pub key_id: String,
}

/// Response for subscription completion.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionData {
    pub account: AccountResponse,
    pub plan_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_order_request_tolerates_empty_body() {
        let request: CreateOrderRequest = serde_json::from_str("{}").unwrap();
        assert!(request.plan_id.is_none());
    }

    #[test]
    fn create_order_request_parses_plan_id() {
        let request: CreateOrderRequest =
            serde_json::from_str(r#"{"planId": "monthly"}"#).unwrap();
        assert_eq!(request.plan_id.as_deref(), Some("monthly"));
    }

    #[test]
    fn complete_subscription_request_parses_without_signature() {
        let json = r#"{
            "planId": "monthly",
            "orderId": "order_123",
            "paymentId": "pay_456"
        }"#;
        let request: CompleteSubscriptionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.order_id, "order_123");
        assert!(request.signature.is_none());
    }

    #[test]
    fn order_data_serializes_camel_case() {
        let data = OrderData {
            order_id: "order_123".to_string(),
            amount: 4900,
            currency: "INR".to_string(),
            receipt: Some("receipt_1".to_string()),
            plan_id: "monthly".to_string(),
            key_id: "rzp_test_xxx".to_string(),
        };
        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains(r#""orderId":"order_123""#));
        assert!(json.contains(r#""keyId":"rzp_test_xxx""#));
    }
}

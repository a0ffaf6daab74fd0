//! Razorpay Orders API adapter.
//!
//! Implements the `PaymentGateway` port against the Razorpay Orders API.
//! Two calls only: create an order for a fixed amount, and fetch an
//! order by its reference to learn the charged amount.
//!
//! Credentials are the key id (`rzp_test_...` / `rzp_live_...`) and the
//! key secret, sent as HTTP basic auth. The secret is handled via
//! `secrecy::SecretString`.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::ports::{GatewayError, GatewayOrder, PaymentGateway};

/// Razorpay API configuration.
#[derive(Clone)]
pub struct RazorpayConfig {
    /// Key id (rzp_live_... or rzp_test_...).
    key_id: String,

    /// Key secret.
    key_secret: SecretString,

    /// Base URL for the Razorpay API (default: https://api.razorpay.com).
    api_base_url: String,
}

impl RazorpayConfig {
    /// Create a new Razorpay configuration.
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: SecretString::new(key_secret.into()),
            api_base_url: "https://api.razorpay.com".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Returns the key id.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }
}

/// Order creation request body.
#[derive(Debug, Serialize)]
struct CreateOrderBody<'a> {
    /// Amount in minor units (paise).
    amount: i64,

    /// ISO currency code.
    currency: &'a str,

    /// Caller-supplied receipt reference.
    receipt: &'a str,

    /// 1 = capture the payment automatically on authorization.
    payment_capture: u8,
}

/// Order as the Razorpay API reports it.
#[derive(Debug, Deserialize)]
struct RazorpayOrder {
    id: String,
    amount: i64,
    currency: String,
    #[serde(default)]
    receipt: Option<String>,
    status: String,
}

impl From<RazorpayOrder> for GatewayOrder {
    fn from(order: RazorpayOrder) -> Self {
        GatewayOrder {
            id: order.id,
            amount: order.amount,
            currency: order.currency,
            receipt: order.receipt,
            status: order.status,
        }
    }
}

/// Razorpay Orders API gateway.
///
/// Production implementation of `PaymentGateway`.
pub struct RazorpayGateway {
    config: RazorpayConfig,
    http_client: reqwest::Client,
}

impl RazorpayGateway {
    /// Create a new gateway with the given configuration.
    pub fn new(config: RazorpayConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    async fn parse_order(&self, response: reqwest::Response) -> Result<GatewayOrder, GatewayError> {
        let order: RazorpayOrder = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse gateway response: {}", e);
            GatewayError::Unavailable(format!("Failed to parse gateway response: {}", e))
        })?;
        Ok(order.into())
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, GatewayError> {
        let url = format!("{}/v1/orders", self.config.api_base_url);

        let body = CreateOrderBody {
            amount,
            currency,
            receipt,
            payment_capture: 1,
        };

        let response = self
            .http_client
            .post(&url)
            .basic_auth(
                &self.config.key_id,
                Some(self.config.key_secret.expose_secret()),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gateway create_order request failed: {}", e);
                GatewayError::Unavailable(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, error = %error_text, "Gateway create_order failed");
            return Err(GatewayError::Rejected(format!(
                "Gateway returned {}: {}",
                status, error_text
            )));
        }

        let order = self.parse_order(response).await?;
        tracing::info!(order_ref = %order.id, amount = order.amount, "Created gateway order");
        Ok(order)
    }

    async fn fetch_order(&self, order_ref: &str) -> Result<GatewayOrder, GatewayError> {
        let url = format!("{}/v1/orders/{}", self.config.api_base_url, order_ref);

        let response = self
            .http_client
            .get(&url)
            .basic_auth(
                &self.config.key_id,
                Some(self.config.key_secret.expose_secret()),
            )
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gateway fetch_order request failed: {}", e);
                GatewayError::Unavailable(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, order_ref = %order_ref, "Gateway fetch_order failed");
            return Err(GatewayError::Unavailable(format!(
                "Gateway returned {}: {}",
                status, error_text
            )));
        }

        self.parse_order(response).await
    }
}

impl std::fmt::Debug for RazorpayGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RazorpayGateway")
            .field("key_id", &self.config.key_id)
            .field("api_base_url", &self.config.api_base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn config_defaults_to_razorpay_api() {
        let config = RazorpayConfig::new("rzp_test_abc", "secret");
        assert_eq!(config.api_base_url, "https://api.razorpay.com");
    }

    #[test]
    fn config_base_url_override() {
        let config =
            RazorpayConfig::new("rzp_test_abc", "secret").with_base_url("http://localhost:8099");
        assert_eq!(config.api_base_url, "http://localhost:8099");
    }

    #[test]
    fn debug_does_not_leak_key_secret() {
        let gateway = RazorpayGateway::new(RazorpayConfig::new("rzp_test_abc", "super-secret"));
        let debug = format!("{:?}", gateway);
        assert!(debug.contains("rzp_test_abc"));
        assert!(!debug.contains("super-secret"));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Wire Format Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn create_order_body_serializes_with_auto_capture() {
        let body = CreateOrderBody {
            amount: 4900,
            currency: "INR",
            receipt: "receipt_1700000000000",
            payment_capture: 1,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["amount"], 4900);
        assert_eq!(json["currency"], "INR");
        assert_eq!(json["receipt"], "receipt_1700000000000");
        assert_eq!(json["payment_capture"], 1);
    }

    #[test]
    fn razorpay_order_maps_to_gateway_order() {
        let json = r#"{
            "id": "order_9A33XWu170gUtm",
            "entity": "order",
            "amount": 14900,
            "amount_paid": 14900,
            "amount_due": 0,
            "currency": "INR",
            "receipt": "receipt_1700000000000",
            "status": "paid",
            "attempts": 1
        }"#;

        let order: RazorpayOrder = serde_json::from_str(json).unwrap();
        let gateway_order: GatewayOrder = order.into();

        assert_eq!(gateway_order.id, "order_9A33XWu170gUtm");
        assert_eq!(gateway_order.amount, 14900);
        assert_eq!(gateway_order.status, "paid");
    }

    #[test]
    fn razorpay_order_tolerates_missing_receipt() {
        let json = r#"{
            "id": "order_x",
            "amount": 4900,
            "currency": "INR",
            "status": "created"
        }"#;

        let order: RazorpayOrder = serde_json::from_str(json).unwrap();
        assert!(order.receipt.is_none());
    }
}

//! CreateOrderHandler - Command handler for creating a payment order.
//!
//! The charge amount always comes from the server-side pricing table;
//! the caller only names a plan. Unknown or absent plan identifiers
//! fall back to the configured default plan (legacy frontends send no
//! plan at all), but an explicit `free` selection is rejected since
//! there is nothing to charge. Every call produces a fresh,
//! independent order.

use std::sync::Arc;

use crate::domain::billing::{amount_for, BillingError, BillingPlan, PurchaseIntent, ORDER_CURRENCY};
use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::{GatewayError, GatewayOrder, PaymentGateway};

/// Command to create a payment order for a plan.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    /// Caller-selected plan identifier; lenient.
    pub plan_id: Option<String>,
}

/// Result of order creation.
#[derive(Debug, Clone)]
pub struct CreateOrderResult {
    pub order: GatewayOrder,
    pub intent: PurchaseIntent,
}

/// Handler for order creation.
pub struct CreateOrderHandler {
    gateway: Arc<dyn PaymentGateway>,
    default_plan: BillingPlan,
}

impl CreateOrderHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>, default_plan: BillingPlan) -> Self {
        Self {
            gateway,
            default_plan,
        }
    }

    pub async fn handle(&self, cmd: CreateOrderCommand) -> Result<CreateOrderResult, DomainError> {
        let plan = BillingPlan::parse_or_default(cmd.plan_id.as_deref(), self.default_plan);

        let amount = amount_for(plan);
        if amount <= 0 {
            return Err(BillingError::invalid_plan(plan.as_str()).into());
        }

        let now = Timestamp::now();
        let receipt = format!("receipt_{}", now.as_unix_millis());

        let order = self
            .gateway
            .create_order(amount, ORDER_CURRENCY, &receipt)
            .await
            .map_err(|e| match e {
                GatewayError::Unavailable(msg) => BillingError::gateway_unavailable(msg),
                GatewayError::Rejected(msg) => BillingError::infrastructure(msg),
            })?;

        let intent = PurchaseIntent::for_plan(order.id.clone(), plan, now);

        tracing::info!(
            order_ref = %order.id,
            plan = %plan,
            amount = amount,
            "Created payment order"
        );

        Ok(CreateOrderResult { order, intent })
    }
}

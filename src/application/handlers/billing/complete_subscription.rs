//! CompleteSubscriptionHandler - Command handler for confirming a paid order.
//!
//! The gateway-reported charge is the sole authority: the order is
//! re-fetched from the gateway and its amount must equal the named
//! plan's fixed price exactly. The caller-supplied confirmation
//! signature is accepted but not verified. On success the account moves
//! to the plan's tier, active.

use std::sync::Arc;

use crate::domain::account::Account;
use crate::domain::billing::{BillingError, BillingPlan, PurchaseIntent};
use crate::domain::foundation::{AccountId, DomainError, Timestamp};
use crate::ports::{AccountRepository, PaymentGateway};

/// Command to complete a subscription purchase.
#[derive(Debug, Clone)]
pub struct CompleteSubscriptionCommand {
    /// The authenticated account completing the purchase.
    pub account_id: AccountId,

    /// Plan identifier; strict, unknown plans are rejected.
    pub plan_id: String,

    /// Gateway order reference from order creation.
    pub order_id: String,

    /// Gateway payment reference. Recorded in logs only.
    pub payment_id: String,

    /// Gateway confirmation signature. Accepted and ignored.
    pub signature: Option<String>,
}

/// Result of a completed purchase.
#[derive(Debug, Clone)]
pub struct CompleteSubscriptionResult {
    pub account: Account,
    pub plan: BillingPlan,
}

/// Handler for subscription completion.
pub struct CompleteSubscriptionHandler {
    repository: Arc<dyn AccountRepository>,
    gateway: Arc<dyn PaymentGateway>,
}

impl CompleteSubscriptionHandler {
    pub fn new(repository: Arc<dyn AccountRepository>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self {
            repository,
            gateway,
        }
    }

    pub async fn handle(
        &self,
        cmd: CompleteSubscriptionCommand,
    ) -> Result<CompleteSubscriptionResult, DomainError> {
        let plan = BillingPlan::parse(&cmd.plan_id)
            .ok_or_else(|| BillingError::plan_not_found(&cmd.plan_id))?;

        let mut account = self
            .repository
            .find_by_id(&cmd.account_id)
            .await?
            .ok_or_else(|| {
                crate::domain::account::AccountError::not_found(cmd.account_id)
            })?;

        // The charge is re-fetched from the gateway; the amount the caller
        // paid never travels through the request.
        let order = self
            .gateway
            .fetch_order(&cmd.order_id)
            .await
            .map_err(|e| BillingError::gateway_unavailable(e.to_string()))?;

        let now = Timestamp::now();
        let intent = PurchaseIntent::for_plan(cmd.order_id.clone(), plan, now);
        if !intent.matches_charge(order.amount) {
            tracing::warn!(
                order_ref = %cmd.order_id,
                expected = intent.expected_amount,
                charged = order.amount,
                "Charged amount does not match plan price"
            );
            return Err(BillingError::payment_mismatch(
                cmd.order_id,
                intent.expected_amount,
                order.amount,
            )
            .into());
        }

        if let Some(signature) = &cmd.signature {
            // Not verified; amount matching is the authority here.
            tracing::debug!(signature_len = signature.len(), "Confirmation signature present");
        }

        account
            .activate_plan(plan.tier(), now)
            .map_err(DomainError::from)?;
        self.repository.save(&account).await?;

        tracing::info!(
            account_id = %account.id,
            order_ref = %intent.order_ref,
            payment_ref = %cmd.payment_id,
            plan = %plan,
            tier = %plan.tier(),
            "Subscription completed"
        );

        Ok(CompleteSubscriptionResult { account, plan })
    }
}

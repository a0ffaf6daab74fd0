//! Purchase intent: the server-recorded expectation of a charge.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::{amount_for, BillingPlan, ORDER_CURRENCY};

/// Expectation of a specific charge amount for a specific plan,
/// created before the user pays.
///
/// Each create-order call produces a fresh, independent intent; intents
/// are never deduplicated or retried. The expected amount always comes
/// from the pricing table, never from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseIntent {
    /// Gateway-assigned order reference.
    pub order_ref: String,

    /// The plan the caller asked to purchase.
    pub plan: BillingPlan,

    /// Expected charge in minor units, from the pricing table.
    pub expected_amount: i64,

    pub currency: String,

    pub created_at: Timestamp,
}

impl PurchaseIntent {
    /// Creates an intent for a plan, pricing it server-side.
    pub fn for_plan(order_ref: impl Into<String>, plan: BillingPlan, now: Timestamp) -> Self {
        Self {
            order_ref: order_ref.into(),
            plan,
            expected_amount: amount_for(plan),
            currency: ORDER_CURRENCY.to_string(),
            created_at: now,
        }
    }

    /// True when the gateway's recorded charge equals the expectation.
    pub fn matches_charge(&self, charged_amount: i64) -> bool {
        charged_amount == self.expected_amount
    }
}

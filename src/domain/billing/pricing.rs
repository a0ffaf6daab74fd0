//! Fixed server-side pricing table.
//!
//! The single source of truth for plan amounts. Amounts are minor
//! currency units (paise).

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::BillingPlan;

/// Currency for all gateway orders.
pub const ORDER_CURRENCY: &str = "INR";

static PRICING: Lazy<HashMap<BillingPlan, i64>> = Lazy::new(|| {
    HashMap::from([
        // Zero-priced; order creation rejects it on amount.
        (BillingPlan::Free, 0),
        (BillingPlan::Monthly, 49 * 100),
        (BillingPlan::SixMonths, 149 * 100),
        (BillingPlan::Annual, 249 * 100),
        // Legacy identifiers keep their historical prices.
        (BillingPlan::Pro, 49 * 100),
        (BillingPlan::Enterprise, 249 * 100),
    ])
});

/// Returns the fixed charge amount for a plan in minor units.
pub fn amount_for(plan: BillingPlan) -> i64 {
    // Every BillingPlan variant has a row; the table is exhaustive.
    *PRICING.get(&plan).expect("pricing table covers all plans")
}

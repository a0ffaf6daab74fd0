//! Billing domain: plan identifiers, the fixed pricing table, and
//! purchase intents.
//!
//! Amounts are always minor currency units computed server-side from the
//! pricing table; caller-supplied amounts are never trusted.

mod errors;
mod plan;
mod pricing;
mod purchase_intent;

pub use errors::BillingError;
pub use plan::BillingPlan;
pub use pricing::{amount_for, ORDER_CURRENCY};
pub use purchase_intent::PurchaseIntent;

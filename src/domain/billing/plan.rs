//! Caller-facing billing plan identifiers.

use serde::{Deserialize, Serialize};

use crate::domain::account::PlanTier;

/// Billing plan selected at purchase time.
///
/// The granular identifiers (`monthly`, `six_months`, `annual`) are the
/// current catalog; `pro` and `enterprise` are legacy identifiers kept
/// for frontends that predate the granular plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingPlan {
    /// Zero-priced catalog row. Never purchasable; recognized so an
    /// explicit `free` selection is rejected instead of silently
    /// upgraded to the default plan.
    Free,
    Monthly,
    SixMonths,
    Annual,
    /// Legacy identifier, priced as `monthly`.
    Pro,
    /// Legacy identifier, priced as `annual`.
    Enterprise,
}

impl BillingPlan {
    /// Strict parse for purchase completion: only purchasable plans;
    /// `free` and unknown identifiers are rejected.
    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "monthly" => Some(BillingPlan::Monthly),
            "six_months" => Some(BillingPlan::SixMonths),
            "annual" => Some(BillingPlan::Annual),
            "pro" => Some(BillingPlan::Pro),
            "enterprise" => Some(BillingPlan::Enterprise),
            _ => None,
        }
    }

    /// Lenient parse used by the legacy create-order variant: unknown or
    /// absent identifiers fall back to the given default plan. An explicit
    /// `free` is recognized, not defaulted, so the caller can reject it on
    /// amount.
    pub fn parse_or_default(id: Option<&str>, default: BillingPlan) -> Self {
        match id {
            Some("free") => BillingPlan::Free,
            other => other.and_then(Self::parse).unwrap_or(default),
        }
    }

    /// The wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingPlan::Free => "free",
            BillingPlan::Monthly => "monthly",
            BillingPlan::SixMonths => "six_months",
            BillingPlan::Annual => "annual",
            BillingPlan::Pro => "pro",
            BillingPlan::Enterprise => "enterprise",
        }
    }

    /// The account tier this plan purchases.
    pub fn tier(&self) -> PlanTier {
        match self {
            BillingPlan::Free => PlanTier::Free,
            BillingPlan::Monthly | BillingPlan::SixMonths | BillingPlan::Pro => PlanTier::Pro,
            BillingPlan::Annual | BillingPlan::Enterprise => PlanTier::Enterprise,
        }
    }
}

impl std::fmt::Display for BillingPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

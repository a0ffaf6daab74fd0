//! HTTP DTOs for the administrative endpoints.

use serde::{Deserialize, Serialize};

use super::super::auth::AccountResponse;

/// Request to set an account's entitlement directly.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEntitlementRequest {
    /// Target tier: `free`, `pro`, or `enterprise`.
    pub tier: String,
    /// Must agree with the tier: paid tiers active, free inactive.
    pub active: bool,
}

/// Response for a single-account override.
#[derive(Debug, Clone, Serialize)]
pub struct EntitlementData {
    pub account: AccountResponse,
}

/// Response for a toggle, naming the tier that was applied.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleData {
    pub account: AccountResponse,
    pub applied_tier: String,
}

/// Response for the account listing.
#[derive(Debug, Clone, Serialize)]
pub struct AccountListData {
    pub accounts: Vec<AccountResponse>,
    pub count: usize,
}

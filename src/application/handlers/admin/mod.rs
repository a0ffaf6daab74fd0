//! Administrative entitlement-override handlers.
//!
//! Every handler here requires an operator principal; ordinary
//! principals are rejected with `Forbidden` before any account is read.

mod list_accounts;
mod toggle_entitlement;
mod update_entitlement;

pub use list_accounts::{ListAccountsCommand, ListAccountsHandler};
pub use toggle_entitlement::{ToggleEntitlementCommand, ToggleEntitlementHandler};
pub use update_entitlement::{UpdateEntitlementCommand, UpdateEntitlementHandler};

//! Account aggregate and the entitlement state machine.
//!
//! The account is the only durable record the core owns. Its
//! plan/active fields mutate exclusively through the entitlement
//! transitions defined on [`Account`].

mod account;
mod credential;
mod errors;
mod tier;

pub use account::Account;
pub use credential::CredentialDigest;
pub use errors::AccountError;
pub use tier::PlanTier;

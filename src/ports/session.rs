//! Session token ports: minting and verifying self-issued tokens.
//!
//! Tokens are self-contained and stateless - there is no server-side
//! session table and no revocation list. Expiry is the only bound on a
//! token's lifetime.

use async_trait::async_trait;

use crate::domain::foundation::{AccountId, AuthError, Principal};

/// Mints signed, time-boxed session tokens.
#[async_trait]
pub trait SessionIssuer: Send + Sync {
    /// Issue a token for an ordinary account principal.
    async fn issue(&self, account_id: &AccountId) -> Result<String, AuthError>;

    /// Issue a token carrying the operator role claim.
    ///
    /// Reserved for ops tooling; ordinary sign-in paths never call this.
    async fn issue_operator(&self, account_id: &AccountId) -> Result<String, AuthError>;
}

/// Verifies self-issued session tokens.
///
/// # Contract
///
/// Implementations must:
/// - Validate the token signature and expiry
/// - Return `AuthError::InvalidToken` for malformed, tampered, or
///   expired tokens
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a session token and return the embedded principal.
    async fn validate(&self, token: &str) -> Result<Principal, AuthError>;
}

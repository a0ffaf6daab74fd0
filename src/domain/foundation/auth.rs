//! Authentication types for the domain layer.
//!
//! A `Principal` is the verified identity produced by credential
//! verification - either the self-issued session-token path or the
//! federated identity-provider path. The types carry no provider
//! dependencies; any verifier can populate them through the ports.

use super::AccountId;
use thiserror::Error;

/// Verified identity extracted from a validated session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// The account this token was issued for.
    pub account_id: AccountId,

    /// Whether the token carries the operator role claim.
    ///
    /// Only operator principals may reach the administrative
    /// entitlement-override paths.
    pub operator: bool,
}

impl Principal {
    /// Creates an ordinary (non-operator) principal.
    pub fn user(account_id: AccountId) -> Self {
        Self {
            account_id,
            operator: false,
        }
    }

    /// Creates an operator principal.
    pub fn operator(account_id: AccountId) -> Self {
        Self {
            account_id,
            operator: true,
        }
    }
}

/// Authentication errors that can occur during token verification.
///
/// These errors are domain-centric - they describe what went wrong from
/// the application's perspective, not the verifier's.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, expired, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Token is valid but the subject no longer resolves to an account.
    #[error("Account not found")]
    AccountNotFound,

    /// Principal lacks the required role for this action.
    #[error("Insufficient permissions")]
    InsufficientPermissions,

    /// The identity provider is unavailable (network, config, etc.).
    #[error("Identity provider unavailable: {0}")]
    ProviderUnavailable(String),
}

impl AuthError {
    /// Creates a provider unavailable error with a message.
    pub fn provider_unavailable(message: impl Into<String>) -> Self {
        Self::ProviderUnavailable(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ProviderUnavailable(_))
    }
}

impl From<AuthError> for super::DomainError {
    fn from(err: AuthError) -> Self {
        use super::ErrorCode;
        let code = match &err {
            AuthError::InvalidToken => ErrorCode::InvalidToken,
            AuthError::AccountNotFound => ErrorCode::AccountNotFound,
            AuthError::InsufficientPermissions => ErrorCode::Forbidden,
            AuthError::ProviderUnavailable(_) => ErrorCode::DependencyUnavailable,
        };
        super::DomainError::new(code, err.to_string())
    }
}

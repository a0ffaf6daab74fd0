//! Federated identity provider port.
//!
//! Verifies a bearer identity assertion issued by the external provider
//! and returns the asserted profile. Selection between this path and the
//! self-issued token path is by caller intent (distinct endpoints), not
//! by token introspection.

use async_trait::async_trait;

use crate::domain::foundation::AuthError;

/// Profile asserted by the identity provider for a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederatedIdentity {
    /// Provider-scoped stable subject identifier.
    pub subject: String,

    /// Verified email address. Required for account binding.
    pub email: String,

    /// Display name, if the provider shares one.
    pub display_name: Option<String>,

    /// Avatar URL, if the provider shares one.
    pub avatar_url: Option<String>,
}

/// Verifies federated identity assertions.
///
/// # Contract
///
/// Implementations must:
/// - Return `AuthError::InvalidToken` if the provider rejects the token
/// - Return `AuthError::ProviderUnavailable` if the provider cannot be
///   reached; callers surface this rather than retrying
/// - Perform no side effects: binding the identity to an account happens
///   in the calling component
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify an identity assertion and return the asserted profile.
    async fn verify(&self, token: &str) -> Result<FederatedIdentity, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_provider_is_object_safe_and_send_sync() {
        fn _assert_trait_object(_: &dyn IdentityProvider) {}
        fn _assert_arc_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_arc_send_sync::<std::sync::Arc<dyn IdentityProvider>>();
    }
}

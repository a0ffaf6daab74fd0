//! Mock authentication adapters for testing.
//!
//! These adapters implement the `SessionIssuer`, `SessionValidator`, and
//! `IdentityProvider` ports for use in tests, avoiding real signing keys
//! and network calls.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AccountId, AuthError, Principal};
use crate::ports::{FederatedIdentity, IdentityProvider, SessionIssuer, SessionValidator};

/// Mock session issuer for testing.
///
/// Mints deterministic tokens of the form `session-<id>` or
/// `operator-session-<id>`.
#[derive(Debug, Default)]
pub struct MockSessionIssuer {
    /// Optional error to return for all issuance (for error testing)
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionIssuer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces all issuance to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }
}

#[async_trait]
impl SessionIssuer for MockSessionIssuer {
    async fn issue(&self, account_id: &AccountId) -> Result<String, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }
        Ok(format!("session-{}", account_id))
    }

    async fn issue_operator(&self, account_id: &AccountId) -> Result<String, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }
        Ok(format!("operator-session-{}", account_id))
    }
}

/// Mock session validator for testing.
///
/// Stores a map of tokens to principals. Tokens not in the map return
/// `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    /// Map of valid tokens to their principals
    tokens: RwLock<HashMap<String, Principal>>,
    /// Optional error to return for all validations (for error testing)
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to an ordinary principal.
    pub fn with_user(self, token: impl Into<String>, account_id: AccountId) -> Self {
        self.tokens
            .write()
            .unwrap()
            .insert(token.into(), Principal::user(account_id));
        self
    }

    /// Adds a valid token that maps to an operator principal.
    pub fn with_operator(self, token: impl Into<String>, account_id: AccountId) -> Self {
        self.tokens
            .write()
            .unwrap()
            .insert(token.into(), Principal::operator(account_id));
        self
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Registers a new valid token at runtime.
    pub fn add_token(&self, token: impl Into<String>, principal: Principal) {
        self.tokens.write().unwrap().insert(token.into(), principal);
    }

    /// Removes a token, making it invalid.
    pub fn remove_token(&self, token: &str) {
        self.tokens.write().unwrap().remove(token);
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<Principal, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

/// Mock identity provider for testing.
///
/// Stores a map of tokens to asserted identities. Unknown tokens return
/// `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockIdentityProvider {
    /// Map of valid assertions to identities
    identities: RwLock<HashMap<String, FederatedIdentity>>,
    /// Optional error to return for all verifications (for error testing)
    force_error: RwLock<Option<AuthError>>,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid assertion that maps to an identity.
    pub fn with_identity(self, token: impl Into<String>, identity: FederatedIdentity) -> Self {
        self.identities.write().unwrap().insert(token.into(), identity);
        self
    }

    /// Adds a simple test identity keyed by its subject.
    pub fn with_test_identity(self, token: impl Into<String>, subject: impl Into<String>) -> Self {
        let subject = subject.into();
        let identity = FederatedIdentity {
            email: format!("{}@test.example.com", subject),
            display_name: Some(format!("Test User {}", subject)),
            avatar_url: None,
            subject,
        };
        self.with_identity(token, identity)
    }

    /// Forces all verifications to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn verify(&self, token: &str) -> Result<FederatedIdentity, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        self.identities
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

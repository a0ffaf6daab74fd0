//! GoogleSignInHandler - Command handler for federated sign-in.
//!
//! Verifies the provider's ID token, then binds the asserted identity
//! to an account: an existing account (matched by asserted email) gets
//! the provider subject linked if it has none; otherwise a new
//! `free/inactive` account is created from the asserted profile. Either
//! way the caller receives a self-issued session token.

use std::sync::Arc;

use crate::domain::account::Account;
use crate::domain::foundation::{AccountId, AuthError, DomainError, Timestamp};
use crate::ports::{AccountRepository, IdentityProvider, SessionIssuer};

/// Command to sign in with a federated ID token.
#[derive(Debug, Clone)]
pub struct GoogleSignInCommand {
    /// The provider-issued ID token, carried in the request body.
    pub id_token: String,
}

/// Result of a successful federated sign-in.
#[derive(Debug, Clone)]
pub struct GoogleSignInResult {
    pub account: Account,
    pub token: String,
    /// True when this sign-in created the account.
    pub created: bool,
}

/// Handler for federated sign-in.
pub struct GoogleSignInHandler {
    repository: Arc<dyn AccountRepository>,
    identity_provider: Arc<dyn IdentityProvider>,
    sessions: Arc<dyn SessionIssuer>,
}

impl GoogleSignInHandler {
    pub fn new(
        repository: Arc<dyn AccountRepository>,
        identity_provider: Arc<dyn IdentityProvider>,
        sessions: Arc<dyn SessionIssuer>,
    ) -> Self {
        Self {
            repository,
            identity_provider,
            sessions,
        }
    }

    pub async fn handle(&self, cmd: GoogleSignInCommand) -> Result<GoogleSignInResult, DomainError> {
        // An unreachable provider means the assertion cannot be verified,
        // which the caller sees as a rejected token, not a server outage.
        let identity = self
            .identity_provider
            .verify(&cmd.id_token)
            .await
            .map_err(|err| {
                if err.is_transient() {
                    tracing::warn!(error = %err, "Identity provider unreachable, rejecting assertion");
                    AuthError::InvalidToken
                } else {
                    err
                }
            })?;
        let now = Timestamp::now();

        let (account, created) = match self.repository.find_by_email(&identity.email).await? {
            Some(mut account) => {
                if account.link_federated_subject(
                    identity.subject.clone(),
                    identity.avatar_url.clone(),
                    now,
                ) {
                    self.repository.save(&account).await?;
                    tracing::info!(account_id = %account.id, "Linked federated identity");
                }
                (account, false)
            }
            None => {
                let account = Account::from_federated_profile(
                    AccountId::new(),
                    identity.subject,
                    &identity.email,
                    identity.display_name.as_deref(),
                    identity.avatar_url,
                    now,
                );
                self.repository.create(&account).await?;
                tracing::info!(account_id = %account.id, "Created account from federated profile");
                (account, true)
            }
        };

        let token = self.sessions.issue(&account.id).await?;

        Ok(GoogleSignInResult {
            account,
            token,
            created,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::{MockIdentityProvider, MockSessionIssuer};
    use crate::adapters::memory::MemoryAccountRepository;
    use crate::domain::account::{CredentialDigest, PlanTier};
    use crate::domain::foundation::{AuthError, ErrorCode};
    use crate::ports::FederatedIdentity;
    use secrecy::SecretString;

    fn identity() -> FederatedIdentity {
        FederatedIdentity {
            subject: "google-sub-1".to_string(),
            email: "ravi@example.com".to_string(),
            display_name: Some("Ravi Kumar Menon".to_string()),
            avatar_url: Some("https://example.com/a.png".to_string()),
        }
    }

    fn handler(
        repo: Arc<MemoryAccountRepository>,
        provider: Arc<MockIdentityProvider>,
    ) -> GoogleSignInHandler {
        GoogleSignInHandler::new(repo, provider, Arc::new(MockSessionIssuer::new()))
    }

    #[tokio::test]
    async fn creates_free_inactive_account_from_profile() {
        let repo = Arc::new(MemoryAccountRepository::new());
        let provider = Arc::new(MockIdentityProvider::new().with_identity("id-token", identity()));

        let result = handler(repo.clone(), provider)
            .handle(GoogleSignInCommand {
                id_token: "id-token".to_string(),
            })
            .await
            .unwrap();

        assert!(result.created);
        assert_eq!(result.account.first_name, "Ravi");
        assert_eq!(result.account.last_name, "Kumar Menon");
        assert_eq!(result.account.tier, PlanTier::Free);
        assert!(!result.account.entitlement_active);
        assert!(result.account.email_verified);
        assert!(result.account.mobile_number.is_none());
        assert!(result.account.is_federated_only());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn links_subject_to_existing_password_account() {
        let existing = Account::signup(
            AccountId::new(),
            "Ravi",
            "Menon",
            "ravi@example.com",
            "9876543210",
            CredentialDigest::from_password("secret99", &SecretString::new("pepper".into())),
            Timestamp::now(),
        );
        let repo = Arc::new(MemoryAccountRepository::new().with_account(existing.clone()));
        let provider = Arc::new(MockIdentityProvider::new().with_identity("id-token", identity()));

        let result = handler(repo.clone(), provider)
            .handle(GoogleSignInCommand {
                id_token: "id-token".to_string(),
            })
            .await
            .unwrap();

        assert!(!result.created);
        assert_eq!(result.account.id, existing.id);
        assert_eq!(
            result.account.federated_subject.as_deref(),
            Some("google-sub-1")
        );
        // Link is persisted.
        let stored = repo.get(&existing.id).unwrap();
        assert_eq!(stored.federated_subject.as_deref(), Some("google-sub-1"));
    }

    #[tokio::test]
    async fn already_linked_account_is_not_rewritten() {
        let repo = Arc::new(MemoryAccountRepository::new());
        let provider = Arc::new(MockIdentityProvider::new().with_identity("id-token", identity()));
        let h = handler(repo.clone(), provider);

        let first = h
            .handle(GoogleSignInCommand {
                id_token: "id-token".to_string(),
            })
            .await
            .unwrap();
        let second = h
            .handle(GoogleSignInCommand {
                id_token: "id-token".to_string(),
            })
            .await
            .unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first.account.id, second.account.id);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn invalid_provider_token_is_rejected() {
        let repo = Arc::new(MemoryAccountRepository::new());
        let provider = Arc::new(MockIdentityProvider::new());

        let err = handler(repo.clone(), provider)
            .handle(GoogleSignInCommand {
                id_token: "bogus".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidToken);
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn provider_outage_is_surfaced_as_invalid_token() {
        let repo = Arc::new(MemoryAccountRepository::new());
        let provider = Arc::new(
            MockIdentityProvider::new().with_error(AuthError::provider_unavailable("down")),
        );

        let err = handler(repo.clone(), provider)
            .handle(GoogleSignInCommand {
                id_token: "id-token".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidToken);
        assert!(repo.is_empty());
    }
}

//! LoginHandler - Command handler for password authentication.
//!
//! Federated-only accounts are redirected to federated sign-in; every
//! other failure is the same `InvalidCredentials` error, which never
//! reveals whether the email or the password was wrong.

use std::sync::Arc;

use secrecy::SecretString;

use crate::domain::account::{Account, AccountError};
use crate::domain::foundation::DomainError;
use crate::ports::{AccountRepository, SessionIssuer};

/// Command to authenticate with email and password.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub account: Account,
    pub token: String,
}

/// Handler for password login.
pub struct LoginHandler {
    repository: Arc<dyn AccountRepository>,
    sessions: Arc<dyn SessionIssuer>,
    pepper: SecretString,
}

impl LoginHandler {
    pub fn new(
        repository: Arc<dyn AccountRepository>,
        sessions: Arc<dyn SessionIssuer>,
        pepper: SecretString,
    ) -> Self {
        Self {
            repository,
            sessions,
            pepper,
        }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, DomainError> {
        let account = self
            .repository
            .find_by_email(&cmd.email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if account.is_federated_only() {
            return Err(AccountError::FederatedOnly.into());
        }

        let credential = account
            .credential
            .as_ref()
            .ok_or(AccountError::InvalidCredentials)?;

        if !credential.verify(&cmd.password, &self.pepper) {
            tracing::debug!(account_id = %account.id, "Password verification failed");
            return Err(AccountError::InvalidCredentials.into());
        }

        let token = self.sessions.issue(&account.id).await?;

        tracing::info!(account_id = %account.id, "Account logged in");

        Ok(LoginResult { account, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionIssuer;
    use crate::adapters::memory::MemoryAccountRepository;
    use crate::domain::account::CredentialDigest;
    use crate::domain::foundation::{AccountId, ErrorCode, Timestamp};

    fn pepper() -> SecretString {
        SecretString::new("pepper".to_string())
    }

    fn password_account() -> Account {
        Account::signup(
            AccountId::new(),
            "Asha",
            "Iyer",
            "asha@example.com",
            "9876543210",
            CredentialDigest::from_password("secret99", &pepper()),
            Timestamp::now(),
        )
    }

    fn federated_account() -> Account {
        Account::from_federated_profile(
            AccountId::new(),
            "google-sub-1",
            "dev@example.com",
            Some("Ravi Menon"),
            None,
            Timestamp::now(),
        )
    }

    fn handler(repo: Arc<MemoryAccountRepository>) -> LoginHandler {
        LoginHandler::new(repo, Arc::new(MockSessionIssuer::new()), pepper())
    }

    #[tokio::test]
    async fn valid_credentials_return_account_and_token() {
        let account = password_account();
        let repo = Arc::new(MemoryAccountRepository::new().with_account(account.clone()));

        let result = handler(repo)
            .handle(LoginCommand {
                email: "asha@example.com".to_string(),
                password: "secret99".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.account.id, account.id);
        assert!(!result.token.is_empty());
    }

    #[tokio::test]
    async fn email_lookup_is_case_insensitive() {
        let repo = Arc::new(MemoryAccountRepository::new().with_account(password_account()));

        let result = handler(repo)
            .handle(LoginCommand {
                email: "ASHA@EXAMPLE.COM".to_string(),
                password: "secret99".to_string(),
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn unknown_email_is_invalid_credentials() {
        let repo = Arc::new(MemoryAccountRepository::new());

        let err = handler(repo)
            .handle(LoginCommand {
                email: "nobody@example.com".to_string(),
                password: "secret99".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidCredentials);
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let repo = Arc::new(MemoryAccountRepository::new().with_account(password_account()));

        let err = handler(repo)
            .handle(LoginCommand {
                email: "asha@example.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidCredentials);
    }

    #[tokio::test]
    async fn wrong_email_and_wrong_password_yield_identical_errors() {
        let repo = Arc::new(MemoryAccountRepository::new().with_account(password_account()));
        let handler = handler(repo);

        let unknown_email = handler
            .handle(LoginCommand {
                email: "nobody@example.com".to_string(),
                password: "secret99".to_string(),
            })
            .await
            .unwrap_err();
        let wrong_password = handler
            .handle(LoginCommand {
                email: "asha@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(unknown_email.code, wrong_password.code);
        assert_eq!(unknown_email.message, wrong_password.message);
    }

    #[tokio::test]
    async fn federated_only_account_is_directed_to_federated_sign_in() {
        let repo = Arc::new(MemoryAccountRepository::new().with_account(federated_account()));

        let err = handler(repo)
            .handle(LoginCommand {
                email: "dev@example.com".to_string(),
                password: "anything".to_string(),
            })
            .await
            .unwrap_err();

        assert!(err.message.contains("Sign in with Google"));
    }
}

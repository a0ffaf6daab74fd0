//! SignupHandler - Command handler for password-based account creation.
//!
//! Validates the registration fields, rejects duplicates (email checked
//! before mobile number), creates a `free/inactive` account, and mints a
//! session token for it.

use std::sync::Arc;

use secrecy::SecretString;

use crate::domain::account::{Account, CredentialDigest};
use crate::domain::foundation::{AccountId, DomainError, Timestamp, ValidationError};
use crate::ports::{AccountRepository, SessionIssuer};

const MAX_NAME_LEN: usize = 50;
const MIN_PASSWORD_LEN: usize = 6;

/// Command to register a new password-based account.
#[derive(Debug, Clone)]
pub struct SignupCommand {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile_number: String,
    pub password: String,
}

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct SignupResult {
    pub account: Account,
    pub token: String,
}

/// Handler for account registration.
pub struct SignupHandler {
    repository: Arc<dyn AccountRepository>,
    sessions: Arc<dyn SessionIssuer>,
    pepper: SecretString,
}

impl SignupHandler {
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

    pub async fn handle(&self, cmd: SignupCommand) -> Result<SignupResult, DomainError> {
        validate(&cmd)?;

        // Duplicate email is reported before duplicate mobile.
        if self.repository.find_by_email(&cmd.email).await?.is_some() {
            return Err(crate::domain::account::AccountError::duplicate_email(&cmd.email).into());
        }
        if self
            .repository
            .find_by_mobile(cmd.mobile_number.trim())
            .await?
            .is_some()
        {
            return Err(
                crate::domain::account::AccountError::duplicate_mobile(&cmd.mobile_number).into(),
            );
        }

        let credential = CredentialDigest::from_password(&cmd.password, &self.pepper);
        let account = Account::signup(
            AccountId::new(),
            cmd.first_name.trim(),
            cmd.last_name.trim(),
            &cmd.email,
            cmd.mobile_number.trim(),
            credential,
            Timestamp::now(),
        );

        // The store's constraints stay authoritative under concurrent signups.
        self.repository.create(&account).await?;

        let token = self.sessions.issue(&account.id).await?;

        tracing::info!(account_id = %account.id, "Registered new account");

        Ok(SignupResult { account, token })
    }
}

fn validate(cmd: &SignupCommand) -> Result<(), ValidationError> {
    validate_name("firstName", &cmd.first_name)?;
    validate_name("lastName", &cmd.last_name)?;
    validate_email(&cmd.email)?;
    validate_mobile(&cmd.mobile_number)?;
    if cmd.password.len() < MIN_PASSWORD_LEN {
        return Err(ValidationError::too_short("password", MIN_PASSWORD_LEN));
    }
    Ok(())
}

fn validate_name(field: &str, value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::too_long(field, MAX_NAME_LEN));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("email"));
    }
    let mut parts = trimmed.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    let well_formed = !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !trimmed.contains(char::is_whitespace);
    if !well_formed {
        return Err(ValidationError::invalid_format(
            "email",
            "must be a valid email address",
        ));
    }
    Ok(())
}

/// Indian mobile numbers: ten digits, leading digit 6-9.
fn validate_mobile(mobile: &str) -> Result<(), ValidationError> {
    let trimmed = mobile.trim();
    let valid = trimmed.len() == 10
        && trimmed.chars().all(|c| c.is_ascii_digit())
        && matches!(trimmed.chars().next(), Some('6'..='9'));
    if !valid {
        return Err(ValidationError::invalid_format(
            "mobileNumber",
            "must be a valid 10-digit mobile number",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionIssuer;
    use crate::adapters::memory::MemoryAccountRepository;
    use crate::domain::account::PlanTier;
    use crate::domain::foundation::ErrorCode;

    fn handler(repo: Arc<MemoryAccountRepository>) -> SignupHandler {
        SignupHandler::new(
            repo,
            Arc::new(MockSessionIssuer::new()),
            SecretString::new("pepper".to_string()),
        )
    }

    fn command() -> SignupCommand {
        SignupCommand {
            first_name: "Asha".to_string(),
            last_name: "Iyer".to_string(),
            email: "Asha@Example.com".to_string(),
            mobile_number: "9876543210".to_string(),
            password: "secret99".to_string(),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Success Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn creates_free_inactive_account_with_token() {
        let repo = Arc::new(MemoryAccountRepository::new());
        let result = handler(repo.clone()).handle(command()).await.unwrap();

        assert_eq!(result.account.tier, PlanTier::Free);
        assert!(!result.account.entitlement_active);
        assert_eq!(result.account.email, "asha@example.com");
        assert!(!result.token.is_empty());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn stored_credential_verifies_the_password() {
        let repo = Arc::new(MemoryAccountRepository::new());
        let result = handler(repo).handle(command()).await.unwrap();

        let credential = result.account.credential.unwrap();
        let pepper = SecretString::new("pepper".to_string());
        assert!(credential.verify("secret99", &pepper));
        assert!(!credential.verify("secret98", &pepper));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Validation Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn rejects_empty_first_name() {
        let repo = Arc::new(MemoryAccountRepository::new());
        let mut cmd = command();
        cmd.first_name = "   ".to_string();

        let err = handler(repo.clone()).handle(cmd).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field"), Some(&"firstName".to_string()));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn rejects_over_long_last_name() {
        let repo = Arc::new(MemoryAccountRepository::new());
        let mut cmd = command();
        cmd.last_name = "x".repeat(51);

        let err = handler(repo).handle(cmd).await.unwrap_err();
        assert_eq!(err.details.get("field"), Some(&"lastName".to_string()));
    }

    #[tokio::test]
    async fn rejects_malformed_email() {
        let repo = Arc::new(MemoryAccountRepository::new());
        for bad in ["not-an-email", "a@b", "@example.com", "a b@example.com"] {
            let mut cmd = command();
            cmd.email = bad.to_string();
            let err = handler(repo.clone()).handle(cmd).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationFailed, "accepted: {}", bad);
        }
    }

    #[tokio::test]
    async fn rejects_malformed_mobile() {
        let repo = Arc::new(MemoryAccountRepository::new());
        for bad in ["12345", "5876543210", "98765432101", "98765abc10"] {
            let mut cmd = command();
            cmd.mobile_number = bad.to_string();
            let err = handler(repo.clone()).handle(cmd).await.unwrap_err();
            assert_eq!(err.details.get("field"), Some(&"mobileNumber".to_string()));
        }
    }

    #[tokio::test]
    async fn rejects_short_password() {
        let repo = Arc::new(MemoryAccountRepository::new());
        let mut cmd = command();
        cmd.password = "12345".to_string();

        let err = handler(repo).handle(cmd).await.unwrap_err();
        assert_eq!(err.details.get("field"), Some(&"password".to_string()));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Duplicate Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn rejects_duplicate_email() {
        let repo = Arc::new(MemoryAccountRepository::new());
        handler(repo.clone()).handle(command()).await.unwrap();

        let mut cmd = command();
        cmd.mobile_number = "9123456789".to_string();
        let err = handler(repo.clone()).handle(cmd).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::DuplicateAccount);
        assert_eq!(err.details.get("field"), Some(&"email".to_string()));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn rejects_duplicate_mobile() {
        let repo = Arc::new(MemoryAccountRepository::new());
        handler(repo.clone()).handle(command()).await.unwrap();

        let mut cmd = command();
        cmd.email = "other@example.com".to_string();
        let err = handler(repo).handle(cmd).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::DuplicateAccount);
        assert_eq!(err.details.get("field"), Some(&"mobileNumber".to_string()));
    }

    #[tokio::test]
    async fn duplicate_email_wins_over_duplicate_mobile() {
        // Same email AND same mobile: the email duplicate is reported.
        let repo = Arc::new(MemoryAccountRepository::new());
        handler(repo.clone()).handle(command()).await.unwrap();

        let err = handler(repo).handle(command()).await.unwrap_err();
        assert_eq!(err.details.get("field"), Some(&"email".to_string()));
    }
}

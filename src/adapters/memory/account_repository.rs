//! In-memory implementation of AccountRepository for tests.
//!
//! Mirrors the Postgres adapter's contract, including uniqueness of
//! email and mobile number, without a database.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::account::{Account, AccountError};
use crate::domain::foundation::AccountId;
use crate::ports::AccountRepository;

/// In-memory account store.
///
/// Uniqueness violations on `create` surface exactly as the Postgres
/// adapter reports them. A forced error can be scripted for failure
/// paths.
#[derive(Debug, Default)]
pub struct MemoryAccountRepository {
    accounts: Mutex<HashMap<AccountId, Account>>,
    force_error: Mutex<Option<AccountError>>,
}

impl MemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds an account.
    pub fn with_account(self, account: Account) -> Self {
        self.accounts.lock().unwrap().insert(account.id, account);
        self
    }

    /// Forces all calls to return the specified error.
    pub fn with_error(self, error: AccountError) -> Self {
        *self.force_error.lock().unwrap() = Some(error);
        self
    }

    /// Inserts or replaces an account at runtime, bypassing uniqueness.
    pub fn put(&self, account: Account) {
        self.accounts.lock().unwrap().insert(account.id, account);
    }

    /// Snapshot of a stored account.
    pub fn get(&self, id: &AccountId) -> Option<Account> {
        self.accounts.lock().unwrap().get(id).cloned()
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn forced_error(&self) -> Option<AccountError> {
        self.force_error.lock().unwrap().clone()
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        if let Some(error) = self.forced_error() {
            return Err(error);
        }
        let needle = email.trim().to_lowercase();
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .values()
            .find(|a| a.email == needle)
            .cloned())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        if let Some(error) = self.forced_error() {
            return Err(error);
        }
        Ok(self.accounts.lock().unwrap().get(id).cloned())
    }

    async fn find_by_mobile(&self, mobile: &str) -> Result<Option<Account>, AccountError> {
        if let Some(error) = self.forced_error() {
            return Err(error);
        }
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .values()
            .find(|a| a.mobile_number.as_deref() == Some(mobile))
            .cloned())
    }

    async fn create(&self, account: &Account) -> Result<(), AccountError> {
        if let Some(error) = self.forced_error() {
            return Err(error);
        }
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.values().any(|a| a.email == account.email) {
            return Err(AccountError::duplicate_email(&account.email));
        }
        if let Some(mobile) = &account.mobile_number {
            if accounts
                .values()
                .any(|a| a.mobile_number.as_deref() == Some(mobile.as_str()))
            {
                return Err(AccountError::duplicate_mobile(mobile));
            }
        }
        accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn save(&self, account: &Account) -> Result<(), AccountError> {
        if let Some(error) = self.forced_error() {
            return Err(error);
        }
        let mut accounts = self.accounts.lock().unwrap();
        if !accounts.contains_key(&account.id) {
            return Err(AccountError::NotFound(account.id));
        }
        accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
        if let Some(error) = self.forced_error() {
            return Err(error);
        }
        let mut all: Vec<Account> = self.accounts.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| b.created_at.as_datetime().cmp(a.created_at.as_datetime()));
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::CredentialDigest;
    use crate::domain::foundation::Timestamp;
    use secrecy::SecretString;

    fn account(email: &str, mobile: &str) -> Account {
        Account::signup(
            AccountId::new(),
            "Test",
            "User",
            email,
            mobile,
            CredentialDigest::from_password("secret99", &SecretString::new("pepper".into())),
            Timestamp::now(),
        )
    }

    #[tokio::test]
    async fn create_then_find_by_email_is_case_insensitive() {
        let repo = MemoryAccountRepository::new();
        repo.create(&account("asha@example.com", "9876543210"))
            .await
            .unwrap();

        let found = repo.find_by_email("ASHA@Example.COM").await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let repo = MemoryAccountRepository::new();
        repo.create(&account("a@example.com", "9876543210"))
            .await
            .unwrap();

        let result = repo.create(&account("a@example.com", "9123456789")).await;
        assert!(matches!(result, Err(AccountError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn duplicate_mobile_is_rejected() {
        let repo = MemoryAccountRepository::new();
        repo.create(&account("a@example.com", "9876543210"))
            .await
            .unwrap();

        let result = repo.create(&account("b@example.com", "9876543210")).await;
        assert!(matches!(result, Err(AccountError::DuplicateMobile(_))));
    }

    #[tokio::test]
    async fn save_of_unknown_account_is_not_found() {
        let repo = MemoryAccountRepository::new();
        let result = repo.save(&account("a@example.com", "9876543210")).await;
        assert!(matches!(result, Err(AccountError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_all_returns_newest_first() {
        let repo = MemoryAccountRepository::new();
        let mut first = account("first@example.com", "9000000001");
        first.created_at = Timestamp::from_unix_secs(1_000);
        let mut second = account("second@example.com", "9000000002");
        second.created_at = Timestamp::from_unix_secs(2_000);
        repo.put(first);
        repo.put(second);

        let all = repo.list_all().await.unwrap();
        assert_eq!(all[0].email, "second@example.com");
        assert_eq!(all[1].email, "first@example.com");
    }
}

//! Account repository port.
//!
//! The store's uniqueness constraints on email and mobile number are
//! authoritative: a `create` that would violate them fails with a
//! duplicate error and must not be retried with the same input.

use async_trait::async_trait;

use crate::domain::account::{Account, AccountError};
use crate::domain::foundation::AccountId;

/// Durable storage for account records.
///
/// # Contract
///
/// Implementations must:
/// - Look up emails case-insensitively (records store lowercased email)
/// - Surface uniqueness violations as `AccountError::DuplicateEmail` /
///   `AccountError::DuplicateMobile`
/// - Treat `save` as an idempotent full-record update keyed by id
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its (case-insensitive) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// Find an account by identifier.
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Find an account by mobile number.
    async fn find_by_mobile(&self, mobile: &str) -> Result<Option<Account>, AccountError>;

    /// Insert a new account record.
    async fn create(&self, account: &Account) -> Result<(), AccountError>;

    /// Idempotent full-record update.
    async fn save(&self, account: &Account) -> Result<(), AccountError>;

    /// All accounts, newest first. Operator listing only.
    async fn list_all(&self) -> Result<Vec<Account>, AccountError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_repository_is_object_safe_and_send_sync() {
        fn _assert_trait_object(_: &dyn AccountRepository) {}
        fn _assert_arc_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_arc_send_sync::<std::sync::Arc<dyn AccountRepository>>();
    }
}

//! ToggleEntitlementHandler - Operator command to flip an account's entitlement.

use std::sync::Arc;

use crate::domain::account::{Account, AccountError, PlanTier};
use crate::domain::foundation::{AccountId, DomainError, Principal, Timestamp};
use crate::ports::AccountRepository;

use super::update_entitlement::require_operator;

/// Command to flip an account between `free/inactive` and `pro/active`.
#[derive(Debug, Clone)]
pub struct ToggleEntitlementCommand {
    pub principal: Principal,
    pub account_id: AccountId,
}

/// Handler for the entitlement toggle.
pub struct ToggleEntitlementHandler {
    repository: Arc<dyn AccountRepository>,
}

impl ToggleEntitlementHandler {
    pub fn new(repository: Arc<dyn AccountRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: ToggleEntitlementCommand,
    ) -> Result<(Account, PlanTier), DomainError> {
        require_operator(&cmd.principal)?;

        let mut account = self
            .repository
            .find_by_id(&cmd.account_id)
            .await?
            .ok_or_else(|| AccountError::not_found(cmd.account_id))?;

        let now = Timestamp::now();
        let new_tier = account.toggle_entitlement(now);
        self.repository.save(&account).await?;

        tracing::info!(
            account_id = %account.id,
            operator_id = %cmd.principal.account_id,
            tier = %new_tier,
            "Entitlement toggled"
        );

        Ok((account, new_tier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryAccountRepository;
    use crate::domain::account::CredentialDigest;
    use crate::domain::foundation::ErrorCode;
    use secrecy::SecretString;

    fn account() -> Account {
        Account::signup(
            AccountId::new(),
            "Asha",
            "Iyer",
            "asha@example.com",
            "9876543210",
            CredentialDigest::from_password("secret99", &SecretString::new("pepper".into())),
            Timestamp::now(),
        )
    }

    #[tokio::test]
    async fn toggle_activates_then_deactivates() {
        let account = account();
        let id = account.id;
        let repo = Arc::new(MemoryAccountRepository::new().with_account(account));
        let handler = ToggleEntitlementHandler::new(repo.clone());
        let principal = Principal::operator(AccountId::new());

        let (_, tier) = handler
            .handle(ToggleEntitlementCommand {
                principal: principal.clone(),
                account_id: id,
            })
            .await
            .unwrap();
        assert_eq!(tier, PlanTier::Pro);
        assert!(repo.get(&id).unwrap().entitlement_active);

        let (_, tier) = handler
            .handle(ToggleEntitlementCommand {
                principal,
                account_id: id,
            })
            .await
            .unwrap();
        assert_eq!(tier, PlanTier::Free);
        assert!(!repo.get(&id).unwrap().entitlement_active);
    }

    #[tokio::test]
    async fn non_operator_is_forbidden() {
        let account = account();
        let id = account.id;
        let repo = Arc::new(MemoryAccountRepository::new().with_account(account));

        let err = ToggleEntitlementHandler::new(repo.clone())
            .handle(ToggleEntitlementCommand {
                principal: Principal::user(AccountId::new()),
                account_id: id,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
        assert!(!repo.get(&id).unwrap().entitlement_active);
    }

    #[tokio::test]
    async fn unknown_account_is_not_found() {
        let repo = Arc::new(MemoryAccountRepository::new());

        let err = ToggleEntitlementHandler::new(repo)
            .handle(ToggleEntitlementCommand {
                principal: Principal::operator(AccountId::new()),
                account_id: AccountId::new(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::AccountNotFound);
    }
}

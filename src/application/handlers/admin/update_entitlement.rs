//! UpdateEntitlementHandler - Operator command to set an account's entitlement.

use std::sync::Arc;

use crate::domain::account::{Account, AccountError, PlanTier};
use crate::domain::foundation::{AccountId, DomainError, ErrorCode, Principal, Timestamp};
use crate::ports::AccountRepository;

/// Command to set an account's tier/active pair directly.
#[derive(Debug, Clone)]
pub struct UpdateEntitlementCommand {
    pub principal: Principal,
    pub account_id: AccountId,
    pub tier: PlanTier,
    pub active: bool,
}

/// Handler for direct entitlement overrides.
pub struct UpdateEntitlementHandler {
    repository: Arc<dyn AccountRepository>,
}

impl UpdateEntitlementHandler {
    pub fn new(repository: Arc<dyn AccountRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpdateEntitlementCommand) -> Result<Account, DomainError> {
        require_operator(&cmd.principal)?;

        let mut account = self
            .repository
            .find_by_id(&cmd.account_id)
            .await?
            .ok_or_else(|| AccountError::not_found(cmd.account_id))?;

        let now = Timestamp::now();
        account.set_entitlement(cmd.tier, cmd.active, now)?;
        self.repository.save(&account).await?;

        tracing::info!(
            account_id = %account.id,
            operator_id = %cmd.principal.account_id,
            tier = %cmd.tier,
            active = cmd.active,
            "Entitlement overridden"
        );

        Ok(account)
    }
}

/// Rejects non-operator principals.
pub(super) fn require_operator(principal: &Principal) -> Result<(), DomainError> {
    if !principal.operator {
        return Err(DomainError::new(
            ErrorCode::Forbidden,
            "Operator role required",
        ));
    }
    Ok(())
}

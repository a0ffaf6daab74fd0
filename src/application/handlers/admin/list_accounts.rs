//! ListAccountsHandler - Operator command to list all accounts.

use std::sync::Arc;

use crate::domain::account::Account;
use crate::domain::foundation::{DomainError, Principal};
use crate::ports::AccountRepository;

use super::update_entitlement::require_operator;

/// Command to list all accounts, newest first.
#[derive(Debug, Clone)]
pub struct ListAccountsCommand {
    pub principal: Principal,
}

/// Handler for the account listing.
pub struct ListAccountsHandler {
    repository: Arc<dyn AccountRepository>,
}

impl ListAccountsHandler {
    pub fn new(repository: Arc<dyn AccountRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: ListAccountsCommand) -> Result<Vec<Account>, DomainError> {
        require_operator(&cmd.principal)?;
        let accounts = self.repository.list_all().await?;
        Ok(accounts)
    }
}

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use super::accounts_model::{Account, AccountUpdate, NewAccount};
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::errors::Result;

/// Service for managing funding accounts.
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
}

impl AccountService {
    pub fn new(repository: Arc<dyn AccountRepositoryTrait>) -> Self {
        AccountService { repository }
    }
}

#[async_trait]
impl AccountServiceTrait for AccountService {
    fn list_accounts(&self, user_id: &str) -> Result<Vec<Account>> {
        self.repository.list(user_id)
    }

    fn get_account(&self, user_id: &str, account_id: &str) -> Result<Account> {
        self.repository.get(user_id, account_id)
    }

    async fn create_account(&self, user_id: &str, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;
        debug!("Creating account '{}'", new_account.name);

        let now = Utc::now().naive_utc();
        let account = Account {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: new_account.name.trim().to_string(),
            account_type: new_account.account_type,
            balance: new_account.balance,
            bank_name: new_account.bank_name,
            currency: new_account.currency,
            created_at: now,
            updated_at: now,
        };
        self.repository.insert(account).await
    }

    async fn update_account(
        &self,
        user_id: &str,
        account_id: &str,
        update: AccountUpdate,
    ) -> Result<Account> {
        update.validate()?;

        let mut account = self.repository.get(user_id, account_id)?;
        account.name = update.name.trim().to_string();
        account.account_type = update.account_type;
        account.bank_name = update.bank_name;
        account.currency = update.currency;
        account.updated_at = Utc::now().naive_utc();
        self.repository.update(account).await
    }

    async fn delete_account(&self, user_id: &str, account_id: &str) -> Result<()> {
        self.repository.delete(user_id, account_id).await?;
        Ok(())
    }
}

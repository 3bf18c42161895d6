use crate::accounts::accounts_model::{Account, AccountUpdate, NewAccount};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for account repository operations
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    fn list(&self, user_id: &str) -> Result<Vec<Account>>;
    fn get(&self, user_id: &str, account_id: &str) -> Result<Account>;
    async fn insert(&self, account: Account) -> Result<Account>;
    async fn update(&self, account: Account) -> Result<Account>;
    async fn delete(&self, user_id: &str, account_id: &str) -> Result<usize>;
}

/// Trait for account service operations
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    fn list_accounts(&self, user_id: &str) -> Result<Vec<Account>>;
    fn get_account(&self, user_id: &str, account_id: &str) -> Result<Account>;
    async fn create_account(&self, user_id: &str, new_account: NewAccount) -> Result<Account>;
    async fn update_account(
        &self,
        user_id: &str,
        account_id: &str,
        update: AccountUpdate,
    ) -> Result<Account>;
    async fn delete_account(&self, user_id: &str, account_id: &str) -> Result<()>;
}

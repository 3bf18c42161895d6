use crate::errors::Result;
use crate::transactions::transactions_model::{NewTransaction, SpendingSummary, Transaction};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Trait for transaction repository operations.
///
/// Booking and deleting a transaction both adjust the source account's
/// balance; the repository applies the record and the new balance in a
/// single storage transaction.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    fn list(&self, user_id: &str, category: Option<&str>) -> Result<Vec<Transaction>>;
    fn get(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;
    async fn insert_with_balance(
        &self,
        transaction: Transaction,
        new_balance: Decimal,
    ) -> Result<Transaction>;
    async fn delete_with_balance(
        &self,
        user_id: &str,
        transaction_id: &str,
        account_id: &str,
        new_balance: Decimal,
    ) -> Result<usize>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn list_transactions(&self, user_id: &str, category: Option<&str>)
        -> Result<Vec<Transaction>>;
    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction>;
    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<()>;
    fn spending_summary(&self, user_id: &str) -> Result<SpendingSummary>;
}

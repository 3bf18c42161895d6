use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use super::transactions_model::{NewTransaction, SpendingSummary, Transaction, TransactionKind};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::accounts::AccountRepositoryTrait;
use crate::errors::Result;

/// Service for booking transactions and aggregating spending.
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
}

impl TransactionService {
    pub fn new(
        repository: Arc<dyn TransactionRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
    ) -> Self {
        TransactionService {
            repository,
            account_repository,
        }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn list_transactions(
        &self,
        user_id: &str,
        category: Option<&str>,
    ) -> Result<Vec<Transaction>> {
        self.repository.list(user_id, category)
    }

    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        new_transaction.validate()?;

        let account = self
            .account_repository
            .get(user_id, &new_transaction.account_id)?;
        let new_balance = match new_transaction.kind {
            TransactionKind::Income => account.balance + new_transaction.amount,
            TransactionKind::Expense => account.balance - new_transaction.amount,
        };

        let now = Utc::now().naive_utc();
        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            date: new_transaction.date.unwrap_or(now),
            description: new_transaction.description.trim().to_string(),
            amount: new_transaction.amount,
            kind: new_transaction.kind,
            category: new_transaction.category.trim().to_string(),
            account_id: account.id,
            created_at: now,
        };
        self.repository
            .insert_with_balance(transaction, new_balance)
            .await
    }

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<()> {
        let transaction = self.repository.get(user_id, transaction_id)?;
        let account = self
            .account_repository
            .get(user_id, &transaction.account_id)?;

        // Undo the balance effect the booking had.
        let restored_balance = match transaction.kind {
            TransactionKind::Income => account.balance - transaction.amount,
            TransactionKind::Expense => account.balance + transaction.amount,
        };
        self.repository
            .delete_with_balance(user_id, transaction_id, &account.id, restored_balance)
            .await?;
        Ok(())
    }

    fn spending_summary(&self, user_id: &str) -> Result<SpendingSummary> {
        let transactions = self.repository.list(user_id, None)?;
        let mut summary = SpendingSummary::new();
        for transaction in transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense)
        {
            summary.add_expense(transaction);
        }
        Ok(summary)
    }
}

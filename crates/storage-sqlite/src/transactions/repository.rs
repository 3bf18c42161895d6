use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::model::TransactionDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{accounts, transactions};
use nestegg_core::errors::{Error, Result};
use nestegg_core::transactions::{Transaction, TransactionRepositoryTrait};

pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TransactionRepository { pool, writer }
    }
}

fn set_account_balance(
    conn: &mut SqliteConnection,
    user_id: &str,
    account_id: &str,
    new_balance: Decimal,
) -> Result<()> {
    let affected = diesel::update(
        accounts::table
            .filter(accounts::id.eq(account_id))
            .filter(accounts::user_id.eq(user_id)),
    )
    .set((
        accounts::balance.eq(new_balance.to_string()),
        accounts::updated_at.eq(Utc::now().naive_utc()),
    ))
    .execute(conn)
    .map_err(StorageError::from)?;
    if affected == 0 {
        return Err(Error::NotFound(format!("Account '{}'", account_id)));
    }
    Ok(())
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn list(&self, user_id: &str, category: Option<&str>) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .into_boxed();
        if let Some(category) = category {
            query = query.filter(transactions::category.eq(category.to_string()));
        }
        let rows = query
            .order(transactions::date.desc())
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    fn get(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;
        let row = transactions::table
            .filter(transactions::id.eq(transaction_id))
            .filter(transactions::user_id.eq(user_id))
            .first::<TransactionDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::NotFound(format!("Transaction '{}'", transaction_id)))?;
        Ok(Transaction::from(row))
    }

    async fn insert_with_balance(
        &self,
        transaction: Transaction,
        new_balance: Decimal,
    ) -> Result<Transaction> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let transaction_db = TransactionDB::from(transaction);
                set_account_balance(
                    conn,
                    &transaction_db.user_id,
                    &transaction_db.account_id,
                    new_balance,
                )?;
                let result_db = diesel::insert_into(transactions::table)
                    .values(&transaction_db)
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Transaction::from(result_db))
            })
            .await
    }

    async fn delete_with_balance(
        &self,
        user_id: &str,
        transaction_id: &str,
        account_id: &str,
        new_balance: Decimal,
    ) -> Result<usize> {
        let user_id = user_id.to_string();
        let transaction_id = transaction_id.to_string();
        let account_id = account_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let affected = diesel::delete(
                    transactions::table
                        .filter(transactions::id.eq(&transaction_id))
                        .filter(transactions::user_id.eq(&user_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::NotFound(format!(
                        "Transaction '{}'",
                        transaction_id
                    )));
                }
                set_account_balance(conn, &user_id, &account_id, new_balance)?;
                Ok(affected)
            })
            .await
    }
}

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use super::model::AccountDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::accounts;
use nestegg_core::accounts::{Account, AccountRepositoryTrait};
use nestegg_core::errors::{Error, Result};

pub struct AccountRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AccountRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        AccountRepository { pool, writer }
    }
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    fn list(&self, user_id: &str) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = accounts::table
            .filter(accounts::user_id.eq(user_id))
            .order(accounts::name.asc())
            .load::<AccountDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Account::from).collect())
    }

    fn get(&self, user_id: &str, account_id: &str) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;
        let row = accounts::table
            .filter(accounts::id.eq(account_id))
            .filter(accounts::user_id.eq(user_id))
            .first::<AccountDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::NotFound(format!("Account '{}'", account_id)))?;
        Ok(Account::from(row))
    }

    async fn insert(&self, account: Account) -> Result<Account> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Account> {
                let account_db = AccountDB::from(account);
                let result_db = diesel::insert_into(accounts::table)
                    .values(&account_db)
                    .returning(AccountDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Account::from(result_db))
            })
            .await
    }

    async fn update(&self, account: Account) -> Result<Account> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Account> {
                let account_db = AccountDB::from(account);
                let affected = diesel::update(
                    accounts::table
                        .filter(accounts::id.eq(&account_db.id))
                        .filter(accounts::user_id.eq(&account_db.user_id)),
                )
                .set(&account_db)
                .execute(conn)
                .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::NotFound(format!("Account '{}'", account_db.id)));
                }
                Ok(Account::from(account_db))
            })
            .await
    }

    async fn delete(&self, user_id: &str, account_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let account_id = account_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    accounts::table
                        .filter(accounts::id.eq(&account_id))
                        .filter(accounts::user_id.eq(&user_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}

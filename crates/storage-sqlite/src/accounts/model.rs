//! Database models for accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use nestegg_core::accounts::{Account, AccountType};

/// Database model for accounts. Money is stored as text to keep full
/// decimal precision.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub account_type: String,
    pub balance: String,
    pub bank_name: Option<String>,
    pub currency: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl AccountDB {
    pub fn balance_decimal(&self) -> Decimal {
        self.balance.parse().unwrap_or(Decimal::ZERO)
    }
}

impl From<AccountDB> for Account {
    fn from(db: AccountDB) -> Self {
        let balance = db.balance_decimal();
        Self {
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            account_type: AccountType::parse(&db.account_type).unwrap_or(AccountType::Bank),
            balance,
            bank_name: db.bank_name,
            currency: db.currency,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Account> for AccountDB {
    fn from(domain: Account) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            name: domain.name,
            account_type: domain.account_type.as_str().to_string(),
            balance: domain.balance.to_string(),
            bank_name: domain.bank_name,
            currency: domain.currency,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

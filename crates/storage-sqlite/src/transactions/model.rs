//! Database models for transactions.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use nestegg_core::transactions::{Transaction, TransactionKind};

/// Database model for transactions.
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
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDateTime,
    pub description: String,
    pub amount: String,
    pub kind: String,
    pub category: String,
    pub account_id: String,
    pub created_at: NaiveDateTime,
}

impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        Self {
            amount: db.amount.parse().unwrap_or(Decimal::ZERO),
            kind: TransactionKind::parse(&db.kind).unwrap_or(TransactionKind::Expense),
            id: db.id,
            user_id: db.user_id,
            date: db.date,
            description: db.description,
            category: db.category,
            account_id: db.account_id,
            created_at: db.created_at,
        }
    }
}

impl From<Transaction> for TransactionDB {
    fn from(domain: Transaction) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            date: domain.date,
            description: domain.description,
            amount: domain.amount.to_string(),
            kind: domain.kind.as_str().to_string(),
            category: domain.category,
            account_id: domain.account_id,
            created_at: domain.created_at,
        }
    }
}

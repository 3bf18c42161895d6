//! Database models for goals.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use nestegg_core::goals::{Goal, SavingStrategy};

/// Database model for goals.
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
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub target_amount: String,
    pub current_amount: String,
    pub saving_strategy: String,
    pub target_date: Option<NaiveDate>,
    pub periodic_contribution: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl GoalDB {
    pub fn current_amount_decimal(&self) -> Decimal {
        self.current_amount.parse().unwrap_or(Decimal::ZERO)
    }
}

impl From<GoalDB> for Goal {
    fn from(db: GoalDB) -> Self {
        Self {
            target_amount: db.target_amount.parse().unwrap_or(Decimal::ZERO),
            current_amount: db.current_amount.parse().unwrap_or(Decimal::ZERO),
            saving_strategy: SavingStrategy::parse(&db.saving_strategy)
                .unwrap_or(SavingStrategy::SelfDependent),
            periodic_contribution: db.periodic_contribution.parse().unwrap_or(Decimal::ZERO),
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            target_date: db.target_date,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Goal> for GoalDB {
    fn from(domain: Goal) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            name: domain.name,
            target_amount: domain.target_amount.to_string(),
            current_amount: domain.current_amount.to_string(),
            saving_strategy: domain.saving_strategy.as_str().to_string(),
            target_date: domain.target_date,
            periodic_contribution: domain.periodic_contribution.to_string(),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

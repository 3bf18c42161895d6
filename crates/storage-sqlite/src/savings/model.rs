//! Database models for saving plans.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use nestegg_core::savings::SavingsPlan;

/// Database model for saving plans.
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
#[diesel(table_name = crate::schema::savings_plans)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SavingsPlanDB {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub amount: String,
    pub spent: String,
    pub is_goal: bool,
    pub goal_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl SavingsPlanDB {
    pub fn amount_decimal(&self) -> Decimal {
        self.amount.parse().unwrap_or(Decimal::ZERO)
    }

    pub fn spent_decimal(&self) -> Decimal {
        self.spent.parse().unwrap_or(Decimal::ZERO)
    }
}

impl From<SavingsPlanDB> for SavingsPlan {
    fn from(db: SavingsPlanDB) -> Self {
        let amount = db.amount_decimal();
        let spent = db.spent_decimal();
        Self {
            id: db.id,
            user_id: db.user_id,
            category: db.category,
            amount,
            spent,
            is_goal: db.is_goal,
            goal_id: db.goal_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<SavingsPlan> for SavingsPlanDB {
    fn from(domain: SavingsPlan) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            category: domain.category,
            amount: domain.amount.to_string(),
            spent: domain.spent.to_string(),
            is_goal: domain.is_goal,
            goal_id: domain.goal_id,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

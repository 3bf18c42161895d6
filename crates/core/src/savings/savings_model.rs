//! Saving plan domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// A recurring saving plan. Plans with `is_goal` set are owned by a goal:
/// `amount` mirrors the goal's per-period contribution and `spent` the
/// cumulative amount contributed so far. `goal_id` is the sole link to the
/// owning goal; the category label is generated once and never used for
/// lookups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavingsPlan {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub amount: Decimal,
    pub spent: Decimal,
    pub is_goal: bool,
    pub goal_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl SavingsPlan {
    /// Fraction of the per-period target already saved, as a percentage.
    pub fn progress_percent(&self) -> Decimal {
        if self.amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (self.spent / self.amount) * Decimal::ONE_HUNDRED
    }
}

/// Input model for creating a user-managed saving plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSavingsPlan {
    pub category: String,
    pub amount: Decimal,
}

impl NewSavingsPlan {
    pub fn validate(&self) -> Result<()> {
        if self.category.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "category".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Saving plan amount must be positive".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for updating a user-managed saving plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsPlanUpdate {
    pub category: String,
    pub amount: Decimal,
}

impl SavingsPlanUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.category.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "category".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Saving plan amount must be positive".to_string(),
            )));
        }
        Ok(())
    }
}

//! Goal domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::notifications::Notification;
use crate::savings::SavingsPlan;
use crate::transactions::Transaction;

/// Saving cadence for a goal.
///
/// `SelfDependent` means the user saves ad hoc: no per-period target, no
/// projected date, and no linked saving plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SavingStrategy {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
    SelfDependent,
}

impl SavingStrategy {
    /// Whether the goal carries a structured plan (a cadence with a
    /// per-period contribution and a linked saving plan).
    pub fn is_structured(&self) -> bool {
        !matches!(self, SavingStrategy::SelfDependent)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SavingStrategy::Daily => "daily",
            SavingStrategy::Weekly => "weekly",
            SavingStrategy::Monthly => "monthly",
            SavingStrategy::Quarterly => "quarterly",
            SavingStrategy::Yearly => "yearly",
            SavingStrategy::SelfDependent => "self-dependent",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "daily" => Some(SavingStrategy::Daily),
            "weekly" => Some(SavingStrategy::Weekly),
            "monthly" => Some(SavingStrategy::Monthly),
            "quarterly" => Some(SavingStrategy::Quarterly),
            "yearly" => Some(SavingStrategy::Yearly),
            "self-dependent" => Some(SavingStrategy::SelfDependent),
            _ => None,
        }
    }
}

/// Lifecycle state of a goal, derived from its amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    Active,
    Reached,
}

/// Domain model representing a savings goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub saving_strategy: SavingStrategy,
    pub target_date: Option<NaiveDate>,
    pub periodic_contribution: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Goal {
    pub fn status(&self) -> GoalStatus {
        if self.current_amount >= self.target_amount {
            GoalStatus::Reached
        } else {
            GoalStatus::Active
        }
    }

    pub fn remaining(&self) -> Decimal {
        (self.target_amount - self.current_amount).max(Decimal::ZERO)
    }
}

/// Input model for creating a new goal.
///
/// For structured strategies exactly one of `target_date` and
/// `periodic_contribution` is the driving input; the other side is derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub name: String,
    pub target_amount: Decimal,
    #[serde(default)]
    pub current_amount: Decimal,
    pub saving_strategy: SavingStrategy,
    pub target_date: Option<NaiveDate>,
    pub periodic_contribution: Option<Decimal>,
}

impl NewGoal {
    pub fn validate(&self, today: NaiveDate) -> Result<()> {
        validate_goal_fields(
            &self.name,
            self.target_amount,
            self.current_amount,
            self.saving_strategy,
            self.target_date,
            self.periodic_contribution,
            today,
        )
    }
}

/// Input model for adjusting an existing goal. The name is immutable; a
/// differing `name`, if supplied, is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub name: Option<String>,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub saving_strategy: SavingStrategy,
    pub target_date: Option<NaiveDate>,
    pub periodic_contribution: Option<Decimal>,
}

impl GoalUpdate {
    pub fn validate(&self, current_name: &str, today: NaiveDate) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim() != current_name {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Goal name cannot be changed after creation".to_string(),
                )));
            }
        }
        validate_goal_fields(
            current_name,
            self.target_amount,
            self.current_amount,
            self.saving_strategy,
            self.target_date,
            self.periodic_contribution,
            today,
        )
    }
}

fn validate_goal_fields(
    name: &str,
    target_amount: Decimal,
    current_amount: Decimal,
    saving_strategy: SavingStrategy,
    target_date: Option<NaiveDate>,
    periodic_contribution: Option<Decimal>,
    today: NaiveDate,
) -> Result<()> {
    if name.trim().chars().count() < 2 {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Goal name must be at least 2 characters".to_string(),
        )));
    }
    if target_amount <= Decimal::ZERO {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Target amount must be positive".to_string(),
        )));
    }
    if current_amount < Decimal::ZERO {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Current amount cannot be negative".to_string(),
        )));
    }
    if current_amount > target_amount {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Current amount cannot be greater than the target amount".to_string(),
        )));
    }

    if saving_strategy.is_structured() {
        match (target_date, periodic_contribution) {
            (Some(date), None) => {
                if date <= today {
                    return Err(Error::Validation(ValidationError::InvalidInput(
                        "Target date must be in the future for a structured saving plan"
                            .to_string(),
                    )));
                }
            }
            (None, Some(contribution)) => {
                if contribution <= Decimal::ZERO {
                    return Err(Error::Validation(ValidationError::InvalidInput(
                        "Contribution per period must be positive".to_string(),
                    )));
                }
            }
            (Some(_), Some(_)) => {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Provide either a target date or a contribution per period, not both"
                        .to_string(),
                )));
            }
            (None, None) => {
                return Err(Error::Validation(ValidationError::MissingField(
                    "targetDate or periodicContribution".to_string(),
                )));
            }
        }
    }
    Ok(())
}

/// Input model for contributing funds toward a goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContribution {
    pub amount: Decimal,
    pub account_id: String,
}

/// Result of a successful contribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionOutcome {
    pub goal: Goal,
    pub account_balance: Decimal,
    pub reached: bool,
    pub transaction_id: String,
}

/// Projection of when a goal completes at its current contribution rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProjection {
    pub goal_id: String,
    pub remaining_amount: Decimal,
    pub periodic_contribution: Decimal,
    pub projected_date: Option<NaiveDate>,
}

/// Precomputed record set for one contribution, applied by the storage
/// layer as a single transaction. The service computes every new value; the
/// repository only writes them (and fails the whole unit if any target row
/// is missing).
#[derive(Debug, Clone)]
pub struct ContributionPosting {
    pub user_id: String,
    pub goal_id: String,
    pub new_current_amount: Decimal,
    pub account_id: String,
    pub new_account_balance: Decimal,
    /// `None` for self-dependent goals (no linked plan to touch).
    pub plan_spent_delta: Option<Decimal>,
    pub transaction: Transaction,
    pub notifications: Vec<Notification>,
}

/// How the linked saving plan must change alongside a goal update.
#[derive(Debug, Clone)]
pub enum LinkedPlanSync {
    /// Re-sync the plan's amount; insert the carried plan if none exists
    /// yet (strategy changed away from self-dependent).
    Upsert(SavingsPlan),
    /// Delete the plan if present (strategy changed to self-dependent).
    Remove,
}

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::goals_model::{
    ContributionOutcome, ContributionPosting, Goal, GoalProjection, GoalStatus, GoalUpdate,
    LinkedPlanSync, NewContribution, NewGoal, SavingStrategy,
};
use super::goals_planner::{derive_completion_date, derive_contribution, round_currency};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::accounts::AccountRepositoryTrait;
use crate::constants::{DEFAULT_CURRENCY, GOAL_CATEGORY_PREFIX, SAVINGS_CATEGORY};
use crate::errors::{Error, Result, ValidationError};
use crate::notifications::{Notification, NotificationKind};
use crate::savings::SavingsPlan;
use crate::transactions::{Transaction, TransactionKind};

/// Service orchestrating goals and their linked saving plans.
pub struct GoalService {
    repository: Arc<dyn GoalRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
}

impl GoalService {
    pub fn new(
        repository: Arc<dyn GoalRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
    ) -> Self {
        GoalService {
            repository,
            account_repository,
        }
    }

    /// Resolves the non-driving side of a structured plan: a supplied
    /// deadline derives the contribution, a supplied contribution derives
    /// the projected date.
    fn resolve_plan(
        saving_strategy: SavingStrategy,
        target_amount: Decimal,
        current_amount: Decimal,
        target_date: Option<NaiveDate>,
        periodic_contribution: Option<Decimal>,
        today: NaiveDate,
    ) -> (Option<NaiveDate>, Decimal) {
        if !saving_strategy.is_structured() {
            return (None, Decimal::ZERO);
        }
        match (target_date, periodic_contribution) {
            (Some(date), _) => (
                Some(date),
                derive_contribution(
                    target_amount,
                    current_amount,
                    saving_strategy,
                    date,
                    today,
                ),
            ),
            (None, Some(contribution)) => {
                let contribution = round_currency(contribution);
                (
                    derive_completion_date(
                        target_amount,
                        current_amount,
                        saving_strategy,
                        contribution,
                        today,
                    ),
                    contribution,
                )
            }
            // Unreachable after validation.
            (None, None) => (None, Decimal::ZERO),
        }
    }

    fn linked_plan_for(goal: &Goal) -> SavingsPlan {
        let now = Utc::now().naive_utc();
        SavingsPlan {
            id: Uuid::new_v4().to_string(),
            user_id: goal.user_id.clone(),
            category: format!("{}{}", GOAL_CATEGORY_PREFIX, goal.name),
            amount: goal.periodic_contribution,
            spent: Decimal::ZERO,
            is_goal: true,
            goal_id: Some(goal.id.clone()),
            created_at: now,
            updated_at: now,
        }
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn list_goals(&self, user_id: &str) -> Result<Vec<Goal>> {
        self.repository.list(user_id)
    }

    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        self.repository.get(user_id, goal_id)
    }

    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal> {
        let today = Utc::now().date_naive();
        new_goal.validate(today)?;

        let (target_date, periodic_contribution) = Self::resolve_plan(
            new_goal.saving_strategy,
            new_goal.target_amount,
            new_goal.current_amount,
            new_goal.target_date,
            new_goal.periodic_contribution,
            today,
        );

        let now = Utc::now().naive_utc();
        let goal = Goal {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: new_goal.name.trim().to_string(),
            target_amount: new_goal.target_amount,
            current_amount: new_goal.current_amount,
            saving_strategy: new_goal.saving_strategy,
            target_date,
            periodic_contribution,
            created_at: now,
            updated_at: now,
        };

        let plan = goal
            .saving_strategy
            .is_structured()
            .then(|| Self::linked_plan_for(&goal));
        debug!(
            "Creating goal '{}' ({}), linked plan: {}",
            goal.name,
            goal.saving_strategy.as_str(),
            plan.is_some()
        );
        self.repository.insert_with_plan(goal, plan).await
    }

    async fn update_goal(&self, user_id: &str, goal_id: &str, update: GoalUpdate) -> Result<Goal> {
        let existing = self.repository.get(user_id, goal_id)?;
        let today = Utc::now().date_naive();
        update.validate(&existing.name, today)?;

        let (target_date, periodic_contribution) = Self::resolve_plan(
            update.saving_strategy,
            update.target_amount,
            update.current_amount,
            update.target_date,
            update.periodic_contribution,
            today,
        );

        let goal = Goal {
            id: existing.id.clone(),
            user_id: existing.user_id.clone(),
            name: existing.name.clone(),
            target_amount: update.target_amount,
            current_amount: update.current_amount,
            saving_strategy: update.saving_strategy,
            target_date,
            periodic_contribution,
            created_at: existing.created_at,
            updated_at: Utc::now().naive_utc(),
        };

        let plan_sync = if goal.saving_strategy.is_structured() {
            LinkedPlanSync::Upsert(Self::linked_plan_for(&goal))
        } else {
            LinkedPlanSync::Remove
        };
        self.repository.update_with_plan(goal, plan_sync).await
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()> {
        let affected = self.repository.delete_with_plan(user_id, goal_id).await?;
        if affected == 0 {
            return Err(Error::NotFound(format!("Goal '{}'", goal_id)));
        }
        Ok(())
    }

    async fn contribute(
        &self,
        user_id: &str,
        goal_id: &str,
        contribution: NewContribution,
    ) -> Result<ContributionOutcome> {
        if contribution.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Contribution amount must be positive".to_string(),
            )));
        }

        let goal = self.repository.get(user_id, goal_id)?;
        if goal.status() == GoalStatus::Reached {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Goal \"{}\" has already been reached",
                goal.name
            ))));
        }

        let account = self
            .account_repository
            .get(user_id, &contribution.account_id)?;
        if account.balance < contribution.amount {
            return Err(Error::InsufficientFunds {
                account_id: account.id,
                balance: account.balance,
                requested: contribution.amount,
            });
        }

        // Clamp at the target: only the amount the goal can still absorb
        // moves out of the account.
        let applied = contribution.amount.min(goal.remaining());
        let new_current_amount = goal.current_amount + applied;
        let reached = new_current_amount >= goal.target_amount;
        let new_account_balance = account.balance - applied;

        let now = Utc::now().naive_utc();
        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            date: now,
            description: format!("Contribution to goal: {}", goal.name),
            amount: applied,
            kind: TransactionKind::Expense,
            category: SAVINGS_CATEGORY.to_string(),
            account_id: account.id.clone(),
            created_at: now,
        };

        let currency = account.currency.as_deref().unwrap_or(DEFAULT_CURRENCY);
        let mut notifications = vec![Notification::new(
            user_id,
            format!(
                "Successfully saved {} {} for your \"{}\" goal.",
                round_currency(applied),
                currency,
                goal.name
            ),
            NotificationKind::Info,
        )];
        if reached {
            notifications.push(Notification::new(
                user_id,
                format!("You reached your \"{}\" goal!", goal.name),
                NotificationKind::Alert,
            ));
        }

        let posting = ContributionPosting {
            user_id: user_id.to_string(),
            goal_id: goal.id.clone(),
            new_current_amount,
            account_id: account.id,
            new_account_balance,
            plan_spent_delta: goal.saving_strategy.is_structured().then_some(applied),
            transaction: transaction.clone(),
            notifications,
        };
        self.repository.apply_contribution(posting).await?;

        let mut updated = goal;
        updated.current_amount = new_current_amount;
        updated.updated_at = now;
        Ok(ContributionOutcome {
            goal: updated,
            account_balance: new_account_balance,
            reached,
            transaction_id: transaction.id,
        })
    }

    fn project_completion(&self, user_id: &str, goal_id: &str) -> Result<GoalProjection> {
        let goal = self.repository.get(user_id, goal_id)?;
        let today = Utc::now().date_naive();
        let projected_date = derive_completion_date(
            goal.target_amount,
            goal.current_amount,
            goal.saving_strategy,
            goal.periodic_contribution,
            today,
        );
        Ok(GoalProjection {
            goal_id: goal.id.clone(),
            remaining_amount: goal.remaining(),
            periodic_contribution: goal.periodic_contribution,
            projected_date,
        })
    }
}

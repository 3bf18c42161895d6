use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::savings_model::{NewSavingsPlan, SavingsPlan, SavingsPlanUpdate};
use super::savings_traits::{SavingsPlanRepositoryTrait, SavingsPlanServiceTrait};
use crate::errors::{Error, Result, ValidationError};

/// Service for user-managed saving plans.
///
/// Goal-linked plans are read-only through this service; they are created,
/// re-synced, and removed by the goal service inside the goal's own
/// transactions.
pub struct SavingsPlanService {
    repository: Arc<dyn SavingsPlanRepositoryTrait>,
}

impl SavingsPlanService {
    pub fn new(repository: Arc<dyn SavingsPlanRepositoryTrait>) -> Self {
        SavingsPlanService { repository }
    }
}

#[async_trait]
impl SavingsPlanServiceTrait for SavingsPlanService {
    fn list_plans(&self, user_id: &str) -> Result<Vec<SavingsPlan>> {
        self.repository.list(user_id)
    }

    fn get_plan(&self, user_id: &str, plan_id: &str) -> Result<SavingsPlan> {
        self.repository.get(user_id, plan_id)
    }

    async fn create_plan(&self, user_id: &str, new_plan: NewSavingsPlan) -> Result<SavingsPlan> {
        new_plan.validate()?;

        let category = new_plan.category.trim().to_string();
        let duplicate = self
            .repository
            .list(user_id)?
            .iter()
            .any(|p| p.category == category);
        if duplicate {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "A saving plan for \"{}\" already exists",
                category
            ))));
        }

        let now = Utc::now().naive_utc();
        let plan = SavingsPlan {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            category,
            amount: new_plan.amount,
            spent: Decimal::ZERO,
            is_goal: false,
            goal_id: None,
            created_at: now,
            updated_at: now,
        };
        self.repository.insert(plan).await
    }

    async fn update_plan(
        &self,
        user_id: &str,
        plan_id: &str,
        update: SavingsPlanUpdate,
    ) -> Result<SavingsPlan> {
        update.validate()?;

        let mut plan = self.repository.get(user_id, plan_id)?;
        if plan.is_goal {
            return Err(Error::GoalLinked(
                "this plan cannot be edited directly, adjust the goal instead".to_string(),
            ));
        }
        plan.category = update.category.trim().to_string();
        plan.amount = update.amount;
        plan.updated_at = Utc::now().naive_utc();
        self.repository.update(plan).await
    }

    async fn delete_plan(&self, user_id: &str, plan_id: &str) -> Result<()> {
        let plan = self.repository.get(user_id, plan_id)?;
        if plan.is_goal {
            return Err(Error::GoalLinked(
                "this plan cannot be deleted directly, delete the goal instead".to_string(),
            ));
        }
        self.repository.delete(user_id, plan_id).await?;
        Ok(())
    }
}

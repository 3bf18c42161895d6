use crate::errors::Result;
use crate::savings::savings_model::{NewSavingsPlan, SavingsPlan, SavingsPlanUpdate};
use async_trait::async_trait;

/// Trait for saving plan repository operations
#[async_trait]
pub trait SavingsPlanRepositoryTrait: Send + Sync {
    fn list(&self, user_id: &str) -> Result<Vec<SavingsPlan>>;
    fn get(&self, user_id: &str, plan_id: &str) -> Result<SavingsPlan>;
    fn find_by_goal(&self, user_id: &str, goal_id: &str) -> Result<Option<SavingsPlan>>;
    async fn insert(&self, plan: SavingsPlan) -> Result<SavingsPlan>;
    async fn update(&self, plan: SavingsPlan) -> Result<SavingsPlan>;
    async fn delete(&self, user_id: &str, plan_id: &str) -> Result<usize>;
}

/// Trait for saving plan service operations
#[async_trait]
pub trait SavingsPlanServiceTrait: Send + Sync {
    fn list_plans(&self, user_id: &str) -> Result<Vec<SavingsPlan>>;
    fn get_plan(&self, user_id: &str, plan_id: &str) -> Result<SavingsPlan>;
    async fn create_plan(&self, user_id: &str, new_plan: NewSavingsPlan) -> Result<SavingsPlan>;
    async fn update_plan(
        &self,
        user_id: &str,
        plan_id: &str,
        update: SavingsPlanUpdate,
    ) -> Result<SavingsPlan>;
    async fn delete_plan(&self, user_id: &str, plan_id: &str) -> Result<()>;
}

use crate::errors::Result;
use crate::goals::goals_model::{
    ContributionOutcome, ContributionPosting, Goal, GoalProjection, GoalUpdate, LinkedPlanSync,
    NewContribution, NewGoal,
};
use crate::savings::SavingsPlan;
use async_trait::async_trait;

/// Trait for goal repository operations.
///
/// The mutating operations are transactional units: a goal and its linked
/// saving plan are inserted, re-synced, or deleted together, and a
/// contribution posting applies all of its writes or none of them.
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn list(&self, user_id: &str) -> Result<Vec<Goal>>;
    fn get(&self, user_id: &str, goal_id: &str) -> Result<Goal>;
    async fn insert_with_plan(&self, goal: Goal, plan: Option<SavingsPlan>) -> Result<Goal>;
    async fn update_with_plan(&self, goal: Goal, plan_sync: LinkedPlanSync) -> Result<Goal>;
    async fn delete_with_plan(&self, user_id: &str, goal_id: &str) -> Result<usize>;
    async fn apply_contribution(&self, posting: ContributionPosting) -> Result<()>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn list_goals(&self, user_id: &str) -> Result<Vec<Goal>>;
    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal>;
    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(&self, user_id: &str, goal_id: &str, update: GoalUpdate) -> Result<Goal>;
    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()>;
    async fn contribute(
        &self,
        user_id: &str,
        goal_id: &str,
        contribution: NewContribution,
    ) -> Result<ContributionOutcome>;
    fn project_completion(&self, user_id: &str, goal_id: &str) -> Result<GoalProjection>;
}

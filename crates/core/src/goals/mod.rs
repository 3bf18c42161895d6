//! Goals module - domain models, the saving-plan calculator, services, and traits.

mod goals_model;
mod goals_planner;
mod goals_service;
#[cfg(test)]
mod goals_service_tests;
mod goals_traits;

pub use goals_model::{
    ContributionOutcome, ContributionPosting, Goal, GoalProjection, GoalStatus, GoalUpdate,
    LinkedPlanSync, NewContribution, NewGoal, SavingStrategy,
};
pub use goals_planner::{
    advance_periods, derive_completion_date, derive_contribution, round_currency,
    whole_periods_between,
};
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};

//! Saving plans module - domain models, services, and traits.
//!
//! Saving plans double as plain recurring budgets and as the auto-generated
//! records that mirror a goal's per-period target and cumulative progress.

mod savings_model;
mod savings_service;
mod savings_traits;

pub use savings_model::{NewSavingsPlan, SavingsPlan, SavingsPlanUpdate};
pub use savings_service::SavingsPlanService;
pub use savings_traits::{SavingsPlanRepositoryTrait, SavingsPlanServiceTrait};

//! Accounts module - domain models, services, and traits.

mod accounts_model;
mod accounts_service;
mod accounts_traits;

pub use accounts_model::{Account, AccountType, AccountUpdate, NewAccount};
pub use accounts_service::AccountService;
pub use accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};

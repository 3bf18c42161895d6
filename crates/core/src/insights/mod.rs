//! AI insights module - financial tips and transaction categorization.
//!
//! The hosted model is an opaque collaborator behind `InsightProviderTrait`:
//! possibly slow, possibly failing, no retries.

mod insights_model;
mod insights_provider;
mod insights_service;
mod insights_traits;

pub use insights_model::{
    CategorySuggestion, FinancialTip, FinancialTipsRequest, FinancialTipsResponse,
    SuggestCategoryRequest, TipAction, TipActionType,
};
pub use insights_provider::{HttpInsightProvider, InsightProviderConfig};
pub use insights_service::InsightsService;
pub use insights_traits::{InsightProviderTrait, InsightsServiceTrait};

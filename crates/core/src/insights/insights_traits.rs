use crate::errors::Result;
use crate::insights::insights_model::{
    CategorySuggestion, FinancialTipsRequest, FinancialTipsResponse, SuggestCategoryRequest,
};
use async_trait::async_trait;

/// Trait abstracting the hosted text-generation service.
///
/// Implementations send one system + user prompt pair and return the raw
/// model reply; parsing is the service's job.
#[async_trait]
pub trait InsightProviderTrait: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}

/// Trait for insight service operations
#[async_trait]
pub trait InsightsServiceTrait: Send + Sync {
    async fn financial_tips(&self, request: FinancialTipsRequest) -> Result<FinancialTipsResponse>;
    async fn suggest_category(&self, request: SuggestCategoryRequest)
        -> Result<CategorySuggestion>;
}

use async_trait::async_trait;
use log::warn;
use std::fmt::Write as _;
use std::sync::Arc;

use super::insights_model::{
    CategorySuggestion, FinancialTipsRequest, FinancialTipsResponse, SuggestCategoryRequest,
};
use super::insights_traits::{InsightProviderTrait, InsightsServiceTrait};
use crate::errors::{Error, Result, ValidationError};

const TIPS_SYSTEM_PROMPT: &str = "You are a personal finance advisor. Analyze the user's \
spending patterns and provide personalized tips to save money. Respond with a JSON object \
holding a \"tips\" array and an optional \"message\" string. Each tip object has a \"tip\" \
string and an optional \"action\" object with \"type\" (\"navigate\" or \"open_dialog\") and \
a \"payload\" (a dashboard path such as \"/dashboard/budgets\", or a dialog name such as \
\"add_goal\"). If there is no significant area for improvement, return an empty \"tips\" \
array and a friendly, encouraging \"message\".";

const CATEGORY_SYSTEM_PROMPT: &str = "You are a personal finance expert. Suggest a category \
for the given transaction. Consider common categories such as Groceries, Dining, \
Entertainment, Utilities, Transportation, Healthcare, Shopping, Income. Respond with a JSON \
object holding \"category\" (string) and \"confidence\" (number between 0 and 1).";

/// Service producing AI-generated tips and category suggestions.
pub struct InsightsService {
    provider: Arc<dyn InsightProviderTrait>,
}

impl InsightsService {
    pub fn new(provider: Arc<dyn InsightProviderTrait>) -> Self {
        InsightsService { provider }
    }

    fn tips_prompt(request: &FinancialTipsRequest) -> String {
        let mut prompt = format!(
            "Spending Data: {}\n\nMonthly Income: {}\n",
            request.spending_data, request.income
        );
        if !request.starred_tips.is_empty() {
            prompt.push_str(
                "\nThe user has already starred these tips; do not generate tips that are \
                 substantially similar to them:\n",
            );
            for tip in &request.starred_tips {
                let _ = writeln!(prompt, "- \"{}\"", tip);
            }
        }
        prompt
    }

    fn category_prompt(request: &SuggestCategoryRequest) -> String {
        format!(
            "Transaction Description: {}\nTransaction Amount: {}\nAccount Type: {}",
            request.description, request.amount, request.account_type
        )
    }
}

/// Pulls the JSON object out of a model reply, tolerating code fences and
/// surrounding prose.
fn extract_json(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&reply[start..=end])
}

#[async_trait]
impl InsightsServiceTrait for InsightsService {
    async fn financial_tips(&self, request: FinancialTipsRequest) -> Result<FinancialTipsResponse> {
        // The spending data is forwarded verbatim; reject it early when it
        // is not valid JSON.
        serde_json::from_str::<serde_json::Value>(&request.spending_data).map_err(|e| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "Invalid JSON provided in spendingData: {}",
                e
            )))
        })?;

        let reply = self
            .provider
            .complete(TIPS_SYSTEM_PROMPT, &Self::tips_prompt(&request))
            .await?;

        let json = extract_json(&reply)
            .ok_or_else(|| Error::RemoteService("model reply held no JSON object".to_string()))?;
        serde_json::from_str(json)
            .map_err(|e| Error::RemoteService(format!("unparseable tips reply: {}", e)))
    }

    async fn suggest_category(
        &self,
        request: SuggestCategoryRequest,
    ) -> Result<CategorySuggestion> {
        let reply = self
            .provider
            .complete(CATEGORY_SYSTEM_PROMPT, &Self::category_prompt(&request))
            .await?;

        // A malformed reply degrades to "no suggestion" so the caller can
        // fall back to manual selection.
        let parsed = extract_json(&reply).and_then(|json| {
            serde_json::from_str::<CategorySuggestion>(json).ok()
        });
        match parsed {
            Some(mut suggestion) => {
                suggestion.confidence = suggestion.confidence.clamp(0.0, 1.0);
                Ok(suggestion)
            }
            None => {
                warn!("Could not parse category suggestion from model reply");
                Ok(CategorySuggestion::none())
            }
        }
    }
}

//! Insight request/response models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request for personalized saving tips.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialTipsRequest {
    /// JSON document of the user's spending (the spending summary).
    pub spending_data: String,
    /// Monthly income.
    pub income: Decimal,
    /// Tips the user already starred; the model avoids repeating them.
    #[serde(default)]
    pub starred_tips: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipActionType {
    Navigate,
    OpenDialog,
}

/// Optional follow-up the UI can offer alongside a tip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipAction {
    #[serde(rename = "type")]
    pub action_type: TipActionType,
    /// Navigation path or dialog name, depending on the type.
    pub payload: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialTip {
    pub tip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<TipAction>,
}

/// Structured tips reply. An empty `tips` array carries an encouraging
/// `message` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialTipsResponse {
    #[serde(default)]
    pub tips: Vec<FinancialTip>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Request to categorize one transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestCategoryRequest {
    pub description: String,
    pub amount: Decimal,
    pub account_type: String,
}

/// Suggested category with the model's confidence in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySuggestion {
    pub category: String,
    pub confidence: f64,
}

impl CategorySuggestion {
    /// The degraded answer when the model's reply cannot be used.
    pub fn none() -> Self {
        CategorySuggestion {
            category: String::new(),
            confidence: 0.0,
        }
    }
}

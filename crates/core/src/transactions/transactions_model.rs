//! Transaction domain models and spending aggregation.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::{Error, Result, ValidationError};

/// Direction of a transaction relative to the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

/// Domain model representing a booked transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDateTime,
    pub description: String,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub category: String,
    pub account_id: String,
    pub created_at: NaiveDateTime,
}

/// Input model for booking a new transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub date: Option<NaiveDateTime>,
    pub description: String,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub category: String,
    pub account_id: String,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "description".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Transaction amount must be positive".to_string(),
            )));
        }
        if self.category.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "category".to_string(),
            )));
        }
        Ok(())
    }
}

/// Expense aggregation over a user's transaction history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingSummary {
    /// "YYYY-MM" month key -> total expenses
    pub by_month: HashMap<String, Decimal>,
    /// category label -> per-category totals
    pub by_category: HashMap<String, CategorySpending>,
    pub total_expenses: Decimal,
    pub transaction_count: i32,
}

/// Per-category slice of the spending summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpending {
    pub category: String,
    pub amount: Decimal,
    pub transaction_count: i32,
}

impl SpendingSummary {
    pub fn new() -> Self {
        SpendingSummary {
            by_month: HashMap::new(),
            by_category: HashMap::new(),
            total_expenses: Decimal::ZERO,
            transaction_count: 0,
        }
    }

    /// Folds one expense transaction into the month and category buckets.
    pub fn add_expense(&mut self, transaction: &Transaction) {
        let month_key = transaction.date.format("%Y-%m").to_string();
        *self.by_month.entry(month_key).or_insert(Decimal::ZERO) += transaction.amount;

        let entry = self
            .by_category
            .entry(transaction.category.clone())
            .or_insert_with(|| CategorySpending {
                category: transaction.category.clone(),
                amount: Decimal::ZERO,
                transaction_count: 0,
            });
        entry.amount += transaction.amount;
        entry.transaction_count += 1;

        self.total_expenses += transaction.amount;
        self.transaction_count += 1;
    }
}

impl Default for SpendingSummary {
    fn default() -> Self {
        Self::new()
    }
}

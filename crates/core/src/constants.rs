/// Decimal precision for currency amounts
pub const CURRENCY_DECIMAL_PRECISION: u32 = 2;

/// Transaction category used for goal contributions
pub const SAVINGS_CATEGORY: &str = "Savings";

/// Category label prefix for goal-linked saving plans
pub const GOAL_CATEGORY_PREFIX: &str = "Goal: ";

/// Fallback currency code when an account does not specify one
pub const DEFAULT_CURRENCY: &str = "USD";

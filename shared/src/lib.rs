use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Budget name shown for expenses whose budget item no longer exists
pub const UNKNOWN_BUDGET_NAME: &str = "Unknown";

/// Category of holiday spending a budget line item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseType {
    Gifts,
    Stocking,
    Decorations,
    Other,
}

impl ExpenseType {
    /// Every category, in the order the configuration form offers them
    pub const ALL: [ExpenseType; 4] = [
        ExpenseType::Gifts,
        ExpenseType::Stocking,
        ExpenseType::Decorations,
        ExpenseType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseType::Gifts => "Gifts",
            ExpenseType::Stocking => "Stocking",
            ExpenseType::Decorations => "Decorations",
            ExpenseType::Other => "Other",
        }
    }
}

impl Default for ExpenseType {
    fn default() -> Self {
        ExpenseType::Gifts
    }
}

impl fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown expense type '{0}', expected one of Gifts, Stocking, Decorations, Other")]
pub struct ParseExpenseTypeError(pub String);

impl FromStr for ExpenseType {
    type Err = ParseExpenseTypeError;

    /// Case-insensitive so CLI input like `gifts` is accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpenseType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseExpenseTypeError(s.to_string()))
    }
}

/// A planned spending allocation for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItem {
    pub id: String,
    pub year: i32,
    /// Free-form label, usually a recipient ("Mom") or a theme ("Tree")
    pub name: String,
    pub expense_type: ExpenseType,
    /// Planned amount, never negative
    pub budget_amount: Decimal,
}

/// An actual recorded spend against a budget item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    /// Weak reference: the budget item may have been deleted since
    pub budget_item_id: String,
    pub expense_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
}

/// Body for POST /api/budgets and PUT /api/budgets/:id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItemRequest {
    pub year: i32,
    pub name: String,
    pub expense_type: ExpenseType,
    pub budget_amount: Decimal,
}

/// Body for POST /api/expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    pub budget_item_id: String,
    pub expense_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
}

/// Spend-vs-budget figures for a single budget item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLine {
    pub budget: BudgetItem,
    pub total_spent: Decimal,
    /// Budget minus spent; negative when over budget
    pub remaining: Decimal,
    /// `None` when the budget amount is zero ("N/A")
    pub percent_used: Option<Decimal>,
    pub expense_count: usize,
    pub over_budget: bool,
}

/// Aggregated dashboard figures for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSummary {
    pub year: i32,
    pub lines: Vec<BudgetLine>,
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    pub total_remaining: Decimal,
}

/// Response for GET /api/years
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableYearsResponse {
    /// Distinct budget years, most recent first
    pub years: Vec<i32>,
    /// Year a client should select when it has none selected yet
    pub default_year: Option<i32>,
}

/// Ordering applied to an expense listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseOrder {
    /// Expense date, newest first
    #[default]
    Date,
    /// Budget name then category, ascending
    Budget,
}

impl ExpenseOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseOrder::Date => "date",
            ExpenseOrder::Budget => "budget",
        }
    }
}

impl fmt::Display for ExpenseOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ExpenseOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(ExpenseOrder::Date),
            "budget" => Ok(ExpenseOrder::Budget),
            other => Err(format!("unknown order '{}', expected date or budget", other)),
        }
    }
}

/// Query parameters for GET /api/expense-listing
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpenseListingRequest {
    /// Restrict to expenses of this year's budgets
    pub year: Option<i32>,
    /// Selected budget name filter
    pub name: Option<String>,
    /// Selected category filter
    pub category: Option<ExpenseType>,
    #[serde(default)]
    pub order: ExpenseOrder,
}

/// An expense joined with the budget it references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRow {
    #[serde(flatten)]
    pub expense: Expense,
    /// Referenced budget's name, or "Unknown" when the budget is gone
    pub budget_name: String,
    pub expense_type: Option<ExpenseType>,
}

impl ExpenseRow {
    pub fn is_orphaned(&self) -> bool {
        self.expense_type.is_none()
    }
}

/// Response for GET /api/expense-listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseListingResponse {
    pub expenses: Vec<ExpenseRow>,
    /// Names selectable given the current category filter
    pub name_options: Vec<String>,
    /// Categories selectable given the current name filter
    pub category_options: Vec<ExpenseType>,
    pub total_amount: Decimal,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_expense_type_parse_is_case_insensitive() {
        assert_eq!("gifts".parse::<ExpenseType>().unwrap(), ExpenseType::Gifts);
        assert_eq!(" Stocking ".parse::<ExpenseType>().unwrap(), ExpenseType::Stocking);
        assert_eq!("DECORATIONS".parse::<ExpenseType>().unwrap(), ExpenseType::Decorations);
        assert!("Food".parse::<ExpenseType>().is_err());
    }

    #[test]
    fn test_budget_item_uses_camel_case_json() {
        let budget = BudgetItem {
            id: "b1".to_string(),
            year: 2024,
            name: "Mom".to_string(),
            expense_type: ExpenseType::Gifts,
            budget_amount: dec!(100),
        };

        let value = serde_json::to_value(&budget).unwrap();
        assert_eq!(value["expenseType"], "Gifts");
        assert_eq!(value["budgetAmount"], json!(100.0));
        assert_eq!(value["year"], 2024);
    }

    #[test]
    fn test_expense_accepts_numeric_amount_and_iso_date() {
        let expense: Expense = serde_json::from_value(json!({
            "id": "e1",
            "budgetItemId": "b1",
            "expenseDate": "2024-12-03",
            "description": "Scarf",
            "amount": 40.5
        }))
        .unwrap();

        assert_eq!(expense.amount, dec!(40.5));
        assert_eq!(expense.expense_date, NaiveDate::from_ymd_opt(2024, 12, 3).unwrap());
    }

    #[test]
    fn test_expense_row_flattens_expense_fields() {
        let row = ExpenseRow {
            expense: Expense {
                id: "e1".to_string(),
                budget_item_id: "gone".to_string(),
                expense_date: NaiveDate::from_ymd_opt(2024, 12, 3).unwrap(),
                description: "Lights".to_string(),
                amount: dec!(12),
            },
            budget_name: UNKNOWN_BUDGET_NAME.to_string(),
            expense_type: None,
        };

        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["budgetItemId"], "gone");
        assert_eq!(value["budgetName"], "Unknown");
        assert!(value["expenseType"].is_null());
        assert!(row.is_orphaned());
    }

    #[test]
    fn test_expense_order_defaults_to_date() {
        let request: ExpenseListingRequest = serde_json::from_value(json!({"year": 2024})).unwrap();
        assert_eq!(request.order, ExpenseOrder::Date);
        assert_eq!("Budget".parse::<ExpenseOrder>().unwrap(), ExpenseOrder::Budget);
    }
}

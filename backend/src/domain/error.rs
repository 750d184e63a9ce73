//! Typed failures raised by the domain services.
//!
//! Services return `anyhow::Result`; the REST layer downcasts to
//! [`DomainError`] to choose a status code.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Longest accepted budget name, in characters
pub const MAX_NAME_LEN: usize = 100;
/// Longest accepted expense description, in characters
pub const MAX_DESCRIPTION_LEN: usize = 256;
pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 9999;
/// Largest accepted budget or expense amount. Keeps every sum well inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = dec!(1_000_000_000_000);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Name must be at most {} characters", MAX_NAME_LEN)]
    NameTooLong,
    #[error("Year {0} is outside the supported range")]
    YearOutOfRange(i32),
    #[error("Budget amount cannot be negative")]
    NegativeBudgetAmount,
    #[error("Amount must be at most {}", MAX_AMOUNT)]
    AmountTooLarge,
    #[error("Description cannot be empty")]
    EmptyDescription,
    #[error("Description must be at most {} characters", MAX_DESCRIPTION_LEN)]
    DescriptionTooLong,
    #[error("Expense amount cannot be negative")]
    NegativeExpenseAmount,
    #[error("Budget item {0} does not exist")]
    UnknownBudgetItem(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
}

impl DomainError {
    pub fn budget_not_found(id: &str) -> Self {
        DomainError::NotFound {
            entity: "Budget item",
            id: id.to_string(),
        }
    }

    pub fn expense_not_found(id: &str) -> Self {
        DomainError::NotFound {
            entity: "Expense",
            id: id.to_string(),
        }
    }
}

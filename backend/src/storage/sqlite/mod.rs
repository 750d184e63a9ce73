//! SQLite implementation of the storage traits, built on sqlx.

pub mod budget_repository;
pub mod connection;
pub mod expense_repository;

pub use budget_repository::BudgetRepository;
pub use connection::DbConnection;
pub use expense_repository::ExpenseRepository;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Amounts are stored as text so no precision is lost to REAL columns
pub(crate) fn parse_amount(raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw).with_context(|| format!("Invalid stored amount '{}'", raw))
}

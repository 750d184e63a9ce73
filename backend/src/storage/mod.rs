//! # Storage Module
//!
//! Persistence for budget items and expenses.
//!
//! The domain layer only sees the traits in [`traits`]; the SQLite
//! implementation lives in [`sqlite`] and is selected at startup.
//!
//! - **Budgets**: one row per line item, amounts stored as decimal text
//! - **Expenses**: one row per spend, with a plain (unenforced) reference to
//!   its budget so deleting a budget leaves its expenses behind

pub mod sqlite;
pub mod traits;

pub use sqlite::{BudgetRepository, DbConnection, ExpenseRepository};
pub use traits::{BudgetStorage, Connection, ExpenseStorage};

//! # Domain Module
//!
//! Business rules for holiday budgeting: budget line items per year, the
//! expenses recorded against them, and the derived views (year summary,
//! filtered expense listing, available years).
//!
//! ## Module Organization
//!
//! - **budget_service**: Budget item CRUD and validation
//! - **expense_service**: Expense recording and deletion
//! - **report_service**: Read-only views assembled from both
//! - **aggregator**: Per-budget and per-year spend totals
//! - **expense_filter**: Name/category filtering, joining and ordering
//! - **year_selection**: Distinct years and the default selection
//!
//! ## Business Rules
//!
//! - Names and descriptions are trimmed and must not be empty
//! - Budget and expense amounts are never negative
//! - An expense must reference an existing budget item when created
//! - Deleting a budget item leaves its expenses in place; they show as "Unknown"
//! - A zero budget has no percent-used figure

pub mod aggregator;
pub mod budget_service;
pub mod error;
pub mod expense_filter;
pub mod expense_service;
pub mod report_service;
pub mod year_selection;

pub use budget_service::BudgetService;
pub use error::{DomainError, ValidationError};
pub use expense_service::ExpenseService;
pub use report_service::ReportService;

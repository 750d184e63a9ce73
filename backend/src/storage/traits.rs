//! # Storage Traits
//!
//! Storage abstractions the domain layer works against, so the SQLite
//! implementation can be swapped without touching the services.

use anyhow::Result;
use async_trait::async_trait;
use shared::{BudgetItem, Expense};

/// Interface for budget line item storage
#[async_trait]
pub trait BudgetStorage: Send + Sync {
    /// Store a new budget item
    async fn store_budget(&self, budget: &BudgetItem) -> Result<()>;

    /// Retrieve a specific budget item by ID
    async fn get_budget(&self, budget_id: &str) -> Result<Option<BudgetItem>>;

    /// List every budget item, in no particular order
    async fn list_budgets(&self) -> Result<Vec<BudgetItem>>;

    /// List the budget items of a single year
    async fn list_budgets_for_year(&self, year: i32) -> Result<Vec<BudgetItem>>;

    /// Replace an existing budget item
    /// Returns false when no item with that ID exists
    async fn update_budget(&self, budget: &BudgetItem) -> Result<bool>;

    /// Delete a budget item. Expenses referencing it are left alone.
    /// Returns true if the item was found and deleted
    async fn delete_budget(&self, budget_id: &str) -> Result<bool>;
}

/// Interface for expense storage. Expenses are never updated in place.
#[async_trait]
pub trait ExpenseStorage: Send + Sync {
    /// Store a new expense
    async fn store_expense(&self, expense: &Expense) -> Result<()>;

    /// List every expense, in no particular order
    async fn list_expenses(&self) -> Result<Vec<Expense>>;

    /// Delete an expense
    /// Returns true if the expense was found and deleted
    async fn delete_expense(&self, expense_id: &str) -> Result<bool>;
}

/// Factory for the repositories of one storage backend
pub trait Connection: Send + Sync + Clone + 'static {
    type BudgetRepository: BudgetStorage + Clone + 'static;
    type ExpenseRepository: ExpenseStorage + Clone + 'static;

    fn create_budget_repository(&self) -> Self::BudgetRepository;

    fn create_expense_repository(&self) -> Self::ExpenseRepository;
}

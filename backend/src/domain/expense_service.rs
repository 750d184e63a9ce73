//! Expense recording. Expenses are created and deleted, never edited.
use crate::domain::error::{DomainError, ValidationError, MAX_AMOUNT, MAX_DESCRIPTION_LEN};
use crate::storage::{BudgetStorage, Connection, ExpenseStorage};
use anyhow::Result;
use rust_decimal::Decimal;
use shared::{CreateExpenseRequest, Expense};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct ExpenseService<C: Connection> {
    expense_repository: C::ExpenseRepository,
    budget_repository: C::BudgetRepository,
}

impl<C: Connection> ExpenseService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            expense_repository: connection.create_expense_repository(),
            budget_repository: connection.create_budget_repository(),
        }
    }

    fn validate(request: CreateExpenseRequest) -> Result<CreateExpenseRequest, ValidationError> {
        let description = request.description.trim().to_string();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ValidationError::DescriptionTooLong);
        }
        if request.amount < Decimal::ZERO {
            return Err(ValidationError::NegativeExpenseAmount);
        }
        if request.amount > MAX_AMOUNT {
            return Err(ValidationError::AmountTooLarge);
        }
        Ok(CreateExpenseRequest {
            description,
            ..request
        })
    }

    /// Every expense, newest first
    pub async fn list_expenses(&self) -> Result<Vec<Expense>> {
        let mut expenses = self.expense_repository.list_expenses().await?;
        expenses.sort_by(|a, b| {
            b.expense_date
                .cmp(&a.expense_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(expenses)
    }

    /// Record an expense against an existing budget item
    pub async fn create_expense(&self, request: CreateExpenseRequest) -> Result<Expense> {
        let request = Self::validate(request).map_err(DomainError::from)?;

        if self
            .budget_repository
            .get_budget(&request.budget_item_id)
            .await?
            .is_none()
        {
            return Err(DomainError::from(ValidationError::UnknownBudgetItem(request.budget_item_id)).into());
        }

        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            budget_item_id: request.budget_item_id,
            expense_date: request.expense_date,
            description: request.description,
            amount: request.amount,
        };
        self.expense_repository.store_expense(&expense).await?;

        info!(
            "Recorded expense {} of {} against budget {}",
            expense.id, expense.amount, expense.budget_item_id
        );
        Ok(expense)
    }

    pub async fn delete_expense(&self, expense_id: &str) -> Result<()> {
        if !self.expense_repository.delete_expense(expense_id).await? {
            return Err(DomainError::expense_not_found(expense_id).into());
        }

        info!("Deleted expense {}", expense_id);
        Ok(())
    }
}

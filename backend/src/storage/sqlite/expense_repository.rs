use anyhow::Result;
use async_trait::async_trait;
use shared::Expense;
use sqlx::{sqlite::SqliteRow, Row};

use super::{parse_amount, DbConnection};
use crate::storage::traits::ExpenseStorage;

/// Repository for expense records
#[derive(Clone)]
pub struct ExpenseRepository {
    db: DbConnection,
}

impl ExpenseRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_expense(row: &SqliteRow) -> Result<Expense> {
        let amount: String = row.try_get("amount")?;

        Ok(Expense {
            id: row.try_get("id")?,
            budget_item_id: row.try_get("budget_item_id")?,
            expense_date: row.try_get("expense_date")?,
            description: row.try_get("description")?,
            amount: parse_amount(&amount)?,
        })
    }
}

#[async_trait]
impl ExpenseStorage for ExpenseRepository {
    async fn store_expense(&self, expense: &Expense) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO expenses (id, budget_item_id, expense_date, description, amount)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&expense.id)
        .bind(&expense.budget_item_id)
        .bind(expense.expense_date)
        .bind(&expense.description)
        .bind(expense.amount.to_string())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn list_expenses(&self) -> Result<Vec<Expense>> {
        let rows = sqlx::query(
            r#"
            SELECT id, budget_item_id, expense_date, description, amount
            FROM expenses
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_expense).collect()
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(expense_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

use anyhow::Result;
use async_trait::async_trait;
use shared::{BudgetItem, ExpenseType};
use sqlx::{sqlite::SqliteRow, Row};

use super::{parse_amount, DbConnection};
use crate::storage::traits::BudgetStorage;

/// Repository for budget line items
#[derive(Clone)]
pub struct BudgetRepository {
    db: DbConnection,
}

impl BudgetRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_budget(row: &SqliteRow) -> Result<BudgetItem> {
        let expense_type: String = row.try_get("expense_type")?;
        let budget_amount: String = row.try_get("budget_amount")?;

        Ok(BudgetItem {
            id: row.try_get("id")?,
            year: row.try_get("year")?,
            name: row.try_get("name")?,
            expense_type: expense_type.parse::<ExpenseType>()?,
            budget_amount: parse_amount(&budget_amount)?,
        })
    }
}

#[async_trait]
impl BudgetStorage for BudgetRepository {
    async fn store_budget(&self, budget: &BudgetItem) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO budget_items (id, year, name, expense_type, budget_amount)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&budget.id)
        .bind(budget.year)
        .bind(&budget.name)
        .bind(budget.expense_type.as_str())
        .bind(budget.budget_amount.to_string())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_budget(&self, budget_id: &str) -> Result<Option<BudgetItem>> {
        let row = sqlx::query(
            r#"
            SELECT id, year, name, expense_type, budget_amount
            FROM budget_items
            WHERE id = ?
            "#,
        )
        .bind(budget_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_budget).transpose()
    }

    async fn list_budgets(&self) -> Result<Vec<BudgetItem>> {
        let rows = sqlx::query(
            r#"
            SELECT id, year, name, expense_type, budget_amount
            FROM budget_items
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_budget).collect()
    }

    async fn list_budgets_for_year(&self, year: i32) -> Result<Vec<BudgetItem>> {
        let rows = sqlx::query(
            r#"
            SELECT id, year, name, expense_type, budget_amount
            FROM budget_items
            WHERE year = ?
            "#,
        )
        .bind(year)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_budget).collect()
    }

    async fn update_budget(&self, budget: &BudgetItem) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE budget_items
            SET year = ?, name = ?, expense_type = ?, budget_amount = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(budget.year)
        .bind(&budget.name)
        .bind(budget.expense_type.as_str())
        .bind(budget.budget_amount.to_string())
        .bind(&budget.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_budget(&self, budget_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM budget_items WHERE id = ?")
            .bind(budget_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    async fn setup_test() -> BudgetRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        BudgetRepository::new(db)
    }

    fn budget(id: &str, year: i32, name: &str) -> BudgetItem {
        BudgetItem {
            id: id.to_string(),
            year,
            name: name.to_string(),
            expense_type: ExpenseType::Gifts,
            budget_amount: dec!(125.50),
        }
    }

    #[tokio::test]
    async fn test_store_and_get_budget() {
        let repo = setup_test().await;
        let item = budget("b1", 2024, "Mom");

        repo.store_budget(&item).await.expect("Failed to store budget");

        let loaded = repo.get_budget("b1").await.expect("Query failed");
        assert_eq!(loaded, Some(item));
        assert!(repo.get_budget("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_budgets_for_year() {
        let repo = setup_test().await;
        repo.store_budget(&budget("b1", 2024, "Mom")).await.unwrap();
        repo.store_budget(&budget("b2", 2023, "Dad")).await.unwrap();
        repo.store_budget(&budget("b3", 2024, "Tree")).await.unwrap();

        let all = repo.list_budgets().await.unwrap();
        assert_eq!(all.len(), 3);

        let mut ids: Vec<String> = repo
            .list_budgets_for_year(2024)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.id)
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["b1", "b3"]);
    }

    #[tokio::test]
    async fn test_update_budget() {
        let repo = setup_test().await;
        repo.store_budget(&budget("b1", 2024, "Mom")).await.unwrap();

        let mut changed = budget("b1", 2025, "Mother");
        changed.expense_type = ExpenseType::Stocking;
        changed.budget_amount = dec!(80);
        assert!(repo.update_budget(&changed).await.unwrap());

        let loaded = repo.get_budget("b1").await.unwrap().unwrap();
        assert_eq!(loaded, changed);

        assert!(!repo.update_budget(&budget("nope", 2024, "X")).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_budget() {
        let repo = setup_test().await;
        repo.store_budget(&budget("b1", 2024, "Mom")).await.unwrap();

        assert!(repo.delete_budget("b1").await.unwrap());
        assert!(repo.get_budget("b1").await.unwrap().is_none());
        assert!(!repo.delete_budget("b1").await.unwrap(), "Second delete should find nothing");
    }
}

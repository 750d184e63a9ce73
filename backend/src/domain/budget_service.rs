//! Budget line item CRUD and validation.
use crate::domain::error::{DomainError, ValidationError, MAX_AMOUNT, MAX_NAME_LEN, MAX_YEAR, MIN_YEAR};
use crate::domain::expense_filter::compare_budgets;
use crate::storage::{BudgetStorage, Connection};
use anyhow::Result;
use rust_decimal::Decimal;
use shared::{BudgetItem, BudgetItemRequest};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct BudgetService<C: Connection> {
    budget_repository: C::BudgetRepository,
}

impl<C: Connection> BudgetService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            budget_repository: connection.create_budget_repository(),
        }
    }

    /// Trim the name and check every field; returns the cleaned request
    pub fn validate(request: BudgetItemRequest) -> Result<BudgetItemRequest, ValidationError> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::NameTooLong);
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&request.year) {
            return Err(ValidationError::YearOutOfRange(request.year));
        }
        if request.budget_amount < Decimal::ZERO {
            return Err(ValidationError::NegativeBudgetAmount);
        }
        if request.budget_amount > MAX_AMOUNT {
            return Err(ValidationError::AmountTooLarge);
        }
        Ok(BudgetItemRequest { name, ..request })
    }

    /// Every budget item, most recent year first and alphabetical within a year
    pub async fn list_budgets(&self) -> Result<Vec<BudgetItem>> {
        let mut budgets = self.budget_repository.list_budgets().await?;
        budgets.sort_by(|a, b| b.year.cmp(&a.year).then_with(|| compare_budgets(a, b)));
        Ok(budgets)
    }

    /// One year's budget items, alphabetical by name
    pub async fn list_budgets_for_year(&self, year: i32) -> Result<Vec<BudgetItem>> {
        let mut budgets = self.budget_repository.list_budgets_for_year(year).await?;
        budgets.sort_by(compare_budgets);
        Ok(budgets)
    }

    pub async fn get_budget(&self, budget_id: &str) -> Result<Option<BudgetItem>> {
        self.budget_repository.get_budget(budget_id).await
    }

    pub async fn create_budget(&self, request: BudgetItemRequest) -> Result<BudgetItem> {
        let request = Self::validate(request).map_err(DomainError::from)?;

        let budget = BudgetItem {
            id: Uuid::new_v4().to_string(),
            year: request.year,
            name: request.name,
            expense_type: request.expense_type,
            budget_amount: request.budget_amount,
        };
        self.budget_repository.store_budget(&budget).await?;

        info!("Created budget item {} ({} {})", budget.id, budget.year, budget.name);
        Ok(budget)
    }

    pub async fn update_budget(&self, budget_id: &str, request: BudgetItemRequest) -> Result<BudgetItem> {
        let request = Self::validate(request).map_err(DomainError::from)?;

        let budget = BudgetItem {
            id: budget_id.to_string(),
            year: request.year,
            name: request.name,
            expense_type: request.expense_type,
            budget_amount: request.budget_amount,
        };
        if !self.budget_repository.update_budget(&budget).await? {
            return Err(DomainError::budget_not_found(budget_id).into());
        }

        info!("Updated budget item {}", budget_id);
        Ok(budget)
    }

    /// Delete a budget item; its expenses stay and become orphans
    pub async fn delete_budget(&self, budget_id: &str) -> Result<()> {
        if !self.budget_repository.delete_budget(budget_id).await? {
            return Err(DomainError::budget_not_found(budget_id).into());
        }

        info!("Deleted budget item {}", budget_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DbConnection;
    use rust_decimal_macros::dec;
    use shared::ExpenseType;

    async fn create_test_service() -> BudgetService<DbConnection> {
        let connection = Arc::new(DbConnection::init_test().await.unwrap());
        BudgetService::new(connection)
    }

    fn request(year: i32, name: &str, amount: Decimal) -> BudgetItemRequest {
        BudgetItemRequest {
            year,
            name: name.to_string(),
            expense_type: ExpenseType::Gifts,
            budget_amount: amount,
        }
    }

    fn validation_error(err: &anyhow::Error) -> Option<&ValidationError> {
        match err.downcast_ref::<DomainError>() {
            Some(DomainError::Validation(v)) => Some(v),
            _ => None,
        }
    }

    #[tokio::test]
    async fn test_create_budget_trims_name() {
        let service = create_test_service().await;

        let budget = service.create_budget(request(2024, "  Mom  ", dec!(100))).await.unwrap();

        assert_eq!(budget.name, "Mom");
        assert!(!budget.id.is_empty());
        assert_eq!(service.get_budget(&budget.id).await.unwrap(), Some(budget));
    }

    #[tokio::test]
    async fn test_create_budget_rejects_invalid_input() {
        let service = create_test_service().await;

        let err = service.create_budget(request(2024, "   ", dec!(10))).await.unwrap_err();
        assert_eq!(validation_error(&err), Some(&ValidationError::EmptyName));

        let err = service.create_budget(request(2024, "Mom", dec!(-1))).await.unwrap_err();
        assert_eq!(validation_error(&err), Some(&ValidationError::NegativeBudgetAmount));

        let err = service.create_budget(request(24, "Mom", dec!(1))).await.unwrap_err();
        assert_eq!(validation_error(&err), Some(&ValidationError::YearOutOfRange(24)));

        let long_name = "x".repeat(MAX_NAME_LEN + 1);
        let err = service.create_budget(request(2024, &long_name, dec!(1))).await.unwrap_err();
        assert_eq!(validation_error(&err), Some(&ValidationError::NameTooLong));

        assert!(service.list_budgets().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_budget_amount_upper_bound() {
        let service = create_test_service().await;
        assert_eq!(MAX_AMOUNT, dec!(1000000000000));

        let err = service
            .create_budget(request(2024, "Mom", MAX_AMOUNT + dec!(0.01)))
            .await
            .unwrap_err();
        assert_eq!(validation_error(&err), Some(&ValidationError::AmountTooLarge));

        let budget = service.create_budget(request(2024, "Mom", MAX_AMOUNT)).await.unwrap();
        assert_eq!(budget.budget_amount, MAX_AMOUNT);
    }

    #[tokio::test]
    async fn test_zero_budget_is_allowed() {
        let service = create_test_service().await;

        let budget = service.create_budget(request(2024, "Neighbours", Decimal::ZERO)).await.unwrap();
        assert_eq!(budget.budget_amount, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_list_budgets_sorted_by_year_then_name() {
        let service = create_test_service().await;
        service.create_budget(request(2023, "Mom", dec!(1))).await.unwrap();
        service.create_budget(request(2024, "Tree", dec!(1))).await.unwrap();
        service.create_budget(request(2024, "Dad", dec!(1))).await.unwrap();

        let listed: Vec<(i32, String)> = service
            .list_budgets()
            .await
            .unwrap()
            .into_iter()
            .map(|b| (b.year, b.name))
            .collect();

        assert_eq!(
            listed,
            vec![
                (2024, "Dad".to_string()),
                (2024, "Tree".to_string()),
                (2023, "Mom".to_string()),
            ]
        );

        let names: Vec<String> = service
            .list_budgets_for_year(2024)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["Dad", "Tree"]);
    }

    #[tokio::test]
    async fn test_update_budget() {
        let service = create_test_service().await;
        let created = service.create_budget(request(2024, "Mom", dec!(100))).await.unwrap();

        let mut change = request(2024, "Mom", dec!(150));
        change.expense_type = ExpenseType::Stocking;
        let updated = service.update_budget(&created.id, change).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.budget_amount, dec!(150));
        assert_eq!(updated.expense_type, ExpenseType::Stocking);
        assert_eq!(service.get_budget(&created.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_budget() {
        let service = create_test_service().await;

        let err = service.update_budget("missing", request(2024, "Mom", dec!(1))).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<DomainError>(), Some(DomainError::NotFound { .. })));

        let err = service.delete_budget("missing").await.unwrap_err();
        assert!(matches!(err.downcast_ref::<DomainError>(), Some(DomainError::NotFound { .. })));
    }
}

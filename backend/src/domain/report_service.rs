//! Read-only views computed from the full budget and expense lists: the
//! available years, the per-year dashboard summary and the filtered expense
//! listing.
use crate::domain::aggregator::summarize_year;
use crate::domain::expense_filter::{build_listing, BudgetFilter, ListingScope};
use crate::domain::year_selection::years_response;
use crate::storage::{BudgetStorage, Connection, ExpenseStorage};
use anyhow::Result;
use shared::{AvailableYearsResponse, ExpenseListingRequest, ExpenseListingResponse, YearSummary};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct ReportService<C: Connection> {
    budget_repository: C::BudgetRepository,
    expense_repository: C::ExpenseRepository,
}

impl<C: Connection> ReportService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            budget_repository: connection.create_budget_repository(),
            expense_repository: connection.create_expense_repository(),
        }
    }

    pub async fn available_years(&self) -> Result<AvailableYearsResponse> {
        let budgets = self.budget_repository.list_budgets().await?;
        Ok(years_response(&budgets))
    }

    pub async fn year_summary(&self, year: i32) -> Result<YearSummary> {
        let budgets = self.budget_repository.list_budgets_for_year(year).await?;
        let expenses = self.expense_repository.list_expenses().await?;
        debug!(
            "Summarizing {} budgets against {} expenses for {}",
            budgets.len(),
            expenses.len(),
            year
        );
        Ok(summarize_year(year, &budgets, &expenses))
    }

    pub async fn expense_listing(&self, request: ExpenseListingRequest) -> Result<ExpenseListingResponse> {
        let (budgets, scope) = match request.year {
            Some(year) => (
                self.budget_repository.list_budgets_for_year(year).await?,
                ListingScope::ScopedToBudgets,
            ),
            None => (self.budget_repository.list_budgets().await?, ListingScope::AllExpenses),
        };
        let expenses = self.expense_repository.list_expenses().await?;

        let filter = BudgetFilter::new(request.name, request.category);
        Ok(build_listing(&budgets, &expenses, &filter, scope, request.order))
    }
}

//! Client application state.
//!
//! Everything the views depend on lives in one explicit [`AppState`] value:
//! the current view, the selected year, the name/category filters and the
//! last data loaded for each view. Mutations go through the API and are
//! always followed by a reload of the current view. API failures are logged
//! and leave the cached data as it was.

use crate::api::{ApiError, BudgetApi};
use shared::{
    BudgetItem, BudgetItemRequest, CreateExpenseRequest, ExpenseListingRequest,
    ExpenseListingResponse, ExpenseOrder, ExpenseType, YearSummary,
};
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Expenses,
    Config,
}

pub struct AppState<A: BudgetApi> {
    api: A,
    view: View,
    selected_year: Option<i32>,
    all_years: bool,
    name_filter: Option<String>,
    category_filter: Option<ExpenseType>,
    order: ExpenseOrder,
    years: Vec<i32>,
    summary: Option<YearSummary>,
    listing: Option<ExpenseListingResponse>,
    budgets: Vec<BudgetItem>,
}

impl<A: BudgetApi> AppState<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            view: View::default(),
            selected_year: None,
            all_years: false,
            name_filter: None,
            category_filter: None,
            order: ExpenseOrder::default(),
            years: Vec::new(),
            summary: None,
            listing: None,
            budgets: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn selected_year(&self) -> Option<i32> {
        self.selected_year
    }

    /// Whether the expenses view ignores the selected year
    pub fn all_years(&self) -> bool {
        self.all_years
    }

    pub fn name_filter(&self) -> Option<&str> {
        self.name_filter.as_deref()
    }

    pub fn category_filter(&self) -> Option<ExpenseType> {
        self.category_filter
    }

    pub fn order(&self) -> ExpenseOrder {
        self.order
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn summary(&self) -> Option<&YearSummary> {
        self.summary.as_ref()
    }

    pub fn listing(&self) -> Option<&ExpenseListingResponse> {
        self.listing.as_ref()
    }

    /// Every budget item, most recent year first; loaded by the config view
    pub fn budgets(&self) -> &[BudgetItem] {
        &self.budgets
    }

    fn log_failure(action: &str, err: &ApiError) {
        error!("Failed to {}: {}", action, err);
    }

    /// Refresh the available years and make sure a year is selected.
    ///
    /// An explicit selection survives as long as that year still exists;
    /// otherwise the most recent year is picked.
    pub async fn load_years(&mut self) {
        match self.api.available_years().await {
            Ok(response) => {
                self.years = response.years;
                let still_exists = self.selected_year.is_some_and(|y| self.years.contains(&y));
                if !still_exists && self.selected_year != response.default_year {
                    debug!("Auto-selecting year {:?}", response.default_year);
                    self.selected_year = response.default_year;
                    self.clear_filter_values();
                }
            }
            Err(e) => Self::log_failure("load available years", &e),
        }
    }

    /// Switch to another year. Filters never carry across years.
    pub async fn select_year(&mut self, year: i32) {
        info!("Selecting year {}", year);
        self.selected_year = Some(year);
        self.all_years = false;
        self.clear_filter_values();
        self.reload_view().await;
    }

    /// List expenses across every year. Only this listing includes expenses
    /// whose budget item was deleted.
    pub async fn set_all_years(&mut self, all_years: bool) {
        self.all_years = all_years;
        self.clear_filter_values();
        self.reload_view().await;
    }

    pub async fn show(&mut self, view: View) {
        self.view = view;
        self.reload().await;
    }

    pub async fn set_name_filter(&mut self, name: Option<String>) {
        self.name_filter = name.filter(|n| !n.trim().is_empty());
        self.reload_view().await;
    }

    pub async fn set_category_filter(&mut self, category: Option<ExpenseType>) {
        self.category_filter = category;
        self.reload_view().await;
    }

    pub async fn set_order(&mut self, order: ExpenseOrder) {
        self.order = order;
        self.reload_view().await;
    }

    pub async fn clear_filters(&mut self) {
        self.clear_filter_values();
        self.reload_view().await;
    }

    fn clear_filter_values(&mut self) {
        self.name_filter = None;
        self.category_filter = None;
    }

    /// Reload the years and then the data of the current view
    pub async fn reload(&mut self) {
        self.load_years().await;
        self.reload_view().await;
    }

    async fn reload_view(&mut self) {
        match self.view {
            View::Dashboard => self.load_summary().await,
            View::Expenses => self.load_listing().await,
            View::Config => self.load_budgets().await,
        }
    }

    async fn load_summary(&mut self) {
        let Some(year) = self.selected_year else {
            self.summary = None;
            return;
        };
        match self.api.year_summary(year).await {
            Ok(summary) => self.summary = Some(summary),
            Err(e) => Self::log_failure("load year summary", &e),
        }
    }

    /// The request the expenses view sends for the current selection
    pub fn listing_request(&self) -> ExpenseListingRequest {
        ExpenseListingRequest {
            year: if self.all_years { None } else { self.selected_year },
            name: self.name_filter.clone(),
            category: self.category_filter,
            order: self.order,
        }
    }

    async fn load_listing(&mut self) {
        let request = self.listing_request();
        match self.api.expense_listing(&request).await {
            Ok(listing) => self.listing = Some(listing),
            Err(e) => Self::log_failure("load expense listing", &e),
        }
    }

    async fn load_budgets(&mut self) {
        match self.api.list_budgets().await {
            Ok(budgets) => self.budgets = budgets,
            Err(e) => Self::log_failure("load budgets", &e),
        }
    }

    /// Returns the created budget, or `None` when the server rejected it
    pub async fn create_budget(&mut self, request: BudgetItemRequest) -> Option<BudgetItem> {
        match self.api.create_budget(&request).await {
            Ok(budget) => {
                self.reload().await;
                Some(budget)
            }
            Err(e) => {
                Self::log_failure("create budget", &e);
                None
            }
        }
    }

    pub async fn update_budget(&mut self, id: &str, request: BudgetItemRequest) -> Option<BudgetItem> {
        match self.api.update_budget(id, &request).await {
            Ok(budget) => {
                self.reload().await;
                Some(budget)
            }
            Err(e) => {
                Self::log_failure("update budget", &e);
                None
            }
        }
    }

    /// Nothing is sent unless `confirmed`. Returns whether the budget was deleted.
    pub async fn delete_budget(&mut self, id: &str, confirmed: bool) -> bool {
        if !confirmed {
            debug!("Delete of budget {} not confirmed", id);
            return false;
        }
        match self.api.delete_budget(id).await {
            Ok(()) => {
                self.reload().await;
                true
            }
            Err(e) => {
                Self::log_failure("delete budget", &e);
                false
            }
        }
    }

    pub async fn create_expense(&mut self, request: CreateExpenseRequest) -> Option<shared::Expense> {
        match self.api.create_expense(&request).await {
            Ok(expense) => {
                self.reload().await;
                Some(expense)
            }
            Err(e) => {
                Self::log_failure("create expense", &e);
                None
            }
        }
    }

    /// Nothing is sent unless `confirmed`. Returns whether the expense was deleted.
    pub async fn delete_expense(&mut self, id: &str, confirmed: bool) -> bool {
        if !confirmed {
            debug!("Delete of expense {} not confirmed", id);
            return false;
        }
        match self.api.delete_expense(id).await {
            Ok(()) => {
                self.reload().await;
                true
            }
            Err(e) => {
                Self::log_failure("delete expense", &e);
                false
            }
        }
    }
}

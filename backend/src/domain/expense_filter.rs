//! Budget/expense filtering and the expense listing view.
//!
//! Two optional selections drive everything here: a budget name and a
//! category. They narrow each other's choices (the selectable names come from
//! budgets matching the selected category and vice versa), and expenses are
//! filtered indirectly through the ids of the matching budgets.

use rust_decimal::Decimal;
use shared::{
    BudgetItem, Expense, ExpenseListingResponse, ExpenseOrder, ExpenseRow, ExpenseType,
    UNKNOWN_BUDGET_NAME,
};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// The current name/category selection. `None` means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetFilter {
    pub name: Option<String>,
    pub category: Option<ExpenseType>,
}

impl BudgetFilter {
    /// Blank names are treated as no selection
    pub fn new(name: Option<String>, category: Option<ExpenseType>) -> Self {
        Self {
            name: name.filter(|n| !n.trim().is_empty()),
            category,
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self::new(Some(name.into()), None)
    }

    pub fn by_category(category: ExpenseType) -> Self {
        Self::new(None, Some(category))
    }

    pub fn is_active(&self) -> bool {
        self.name.is_some() || self.category.is_some()
    }

    pub fn matches(&self, budget: &BudgetItem) -> bool {
        let name_ok = self.name.as_deref().map_or(true, |n| budget.name == n);
        let category_ok = self.category.map_or(true, |c| budget.expense_type == c);
        name_ok && category_ok
    }
}

/// Which expenses a listing starts from before any filter is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingScope {
    /// Only expenses referencing one of the given budgets (a year's view)
    ScopedToBudgets,
    /// Every expense, including ones whose budget is gone
    AllExpenses,
}

/// Alphabetical, case-insensitive first so "dad" sorts beside "Dad"
pub(crate) fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Budget name, then category, then id for a stable order
pub(crate) fn compare_budgets(a: &BudgetItem, b: &BudgetItem) -> Ordering {
    compare_names(&a.name, &b.name)
        .then_with(|| a.expense_type.as_str().cmp(&b.expense_type.as_str()))
        .then_with(|| a.id.cmp(&b.id))
}

pub fn filter_budgets<'a>(budgets: &'a [BudgetItem], filter: &BudgetFilter) -> Vec<&'a BudgetItem> {
    budgets.iter().filter(|b| filter.matches(b)).collect()
}

/// Distinct budget names selectable while `category` is selected
pub fn name_options(budgets: &[BudgetItem], category: Option<ExpenseType>) -> Vec<String> {
    let filter = BudgetFilter::new(None, category);
    let mut names: Vec<String> = filter_budgets(budgets, &filter)
        .into_iter()
        .map(|b| b.name.clone())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    names.sort_by(|a, b| compare_names(a, b));
    names
}

/// Distinct categories selectable while `name` is selected
pub fn category_options(budgets: &[BudgetItem], name: Option<&str>) -> Vec<ExpenseType> {
    let filter = BudgetFilter::new(name.map(str::to_string), None);
    let mut categories: Vec<ExpenseType> = filter_budgets(budgets, &filter)
        .into_iter()
        .map(|b| b.expense_type)
        .collect();
    categories.sort_by_key(|c| c.as_str());
    categories.dedup();
    categories
}

/// Expenses whose budget item matches `filter`, via the matching budget ids
pub fn filter_expenses<'a>(
    expenses: &'a [Expense],
    budgets: &[BudgetItem],
    filter: &BudgetFilter,
) -> Vec<&'a Expense> {
    let ids: HashSet<&str> = filter_budgets(budgets, filter)
        .into_iter()
        .map(|b| b.id.as_str())
        .collect();

    expenses
        .iter()
        .filter(|e| ids.contains(e.budget_item_id.as_str()))
        .collect()
}

/// Attach the referenced budget's name and category to each expense
pub fn join_expenses<'a, I>(expenses: I, budgets: &[BudgetItem]) -> Vec<ExpenseRow>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let by_id: HashMap<&str, &BudgetItem> = budgets.iter().map(|b| (b.id.as_str(), b)).collect();

    expenses
        .into_iter()
        .map(|expense| match by_id.get(expense.budget_item_id.as_str()) {
            Some(budget) => ExpenseRow {
                expense: expense.clone(),
                budget_name: budget.name.clone(),
                expense_type: Some(budget.expense_type),
            },
            None => ExpenseRow {
                expense: expense.clone(),
                budget_name: UNKNOWN_BUDGET_NAME.to_string(),
                expense_type: None,
            },
        })
        .collect()
}

fn category_key(row: &ExpenseRow) -> &'static str {
    row.expense_type.map(|t| t.as_str()).unwrap_or("")
}

fn compare_by_budget(a: &ExpenseRow, b: &ExpenseRow) -> Ordering {
    compare_names(&a.budget_name, &b.budget_name).then_with(|| category_key(a).cmp(&category_key(b)))
}

pub fn sort_rows(rows: &mut [ExpenseRow], order: ExpenseOrder) {
    match order {
        ExpenseOrder::Date => rows.sort_by(|a, b| {
            b.expense.expense_date
                .cmp(&a.expense.expense_date)
                .then_with(|| compare_by_budget(a, b))
                .then_with(|| a.expense.id.cmp(&b.expense.id))
        }),
        ExpenseOrder::Budget => rows.sort_by(|a, b| {
            compare_by_budget(a, b)
                .then_with(|| b.expense.expense_date.cmp(&a.expense.expense_date))
                .then_with(|| a.expense.id.cmp(&b.expense.id))
        }),
    }
}

/// Build the filtered, joined and sorted expense listing.
///
/// `budgets` is the listing's universe (a year's budgets, or all of them);
/// the name/category options are narrowed from it as well.
pub fn build_listing(
    budgets: &[BudgetItem],
    expenses: &[Expense],
    filter: &BudgetFilter,
    scope: ListingScope,
    order: ExpenseOrder,
) -> ExpenseListingResponse {
    let selected: Vec<&Expense> = if filter.is_active() || scope == ListingScope::ScopedToBudgets {
        filter_expenses(expenses, budgets, filter)
    } else {
        expenses.iter().collect()
    };

    let mut rows = join_expenses(selected, budgets);
    sort_rows(&mut rows, order);

    let total_amount: Decimal = rows.iter().map(|r| r.expense.amount).sum();

    ExpenseListingResponse {
        expenses: rows,
        name_options: name_options(budgets, filter.category),
        category_options: category_options(budgets, filter.name.as_deref()),
        total_amount,
    }
}

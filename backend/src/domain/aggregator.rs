//! Spend-vs-budget aggregation.
//!
//! Joins expenses to budget items by id and derives, per item, the total
//! spent, the remaining balance and the percentage of the budget used, plus
//! simple sums across all items. Everything here is pure and infallible.

use rust_decimal::Decimal;
use shared::{BudgetItem, BudgetLine, Expense, YearSummary};
use std::collections::HashMap;

use super::expense_filter::compare_budgets;

/// `total_spent / budget_amount * 100`, rounded to two places.
///
/// Returns `None` when the budget amount is zero so callers can show "N/A"
/// instead of an infinite or NaN percentage.
pub fn percent_used(total_spent: Decimal, budget_amount: Decimal) -> Option<Decimal> {
    total_spent
        .checked_div(budget_amount)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|percent| percent.round_dp(2))
}

/// Sum and count expenses per referenced budget item id
fn spend_by_budget(expenses: &[Expense]) -> HashMap<&str, (Decimal, usize)> {
    let mut totals: HashMap<&str, (Decimal, usize)> = HashMap::new();
    for expense in expenses {
        let entry = totals
            .entry(expense.budget_item_id.as_str())
            .or_insert((Decimal::ZERO, 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }
    totals
}

fn line_from_totals(budget: &BudgetItem, total_spent: Decimal, expense_count: usize) -> BudgetLine {
    let remaining = budget.budget_amount - total_spent;
    BudgetLine {
        budget: budget.clone(),
        total_spent,
        remaining,
        percent_used: percent_used(total_spent, budget.budget_amount),
        expense_count,
        over_budget: remaining < Decimal::ZERO,
    }
}

/// Summarize a single budget item against any set of expenses
pub fn summarize_budget(budget: &BudgetItem, expenses: &[Expense]) -> BudgetLine {
    let (total_spent, expense_count) = expenses
        .iter()
        .filter(|e| e.budget_item_id == budget.id)
        .fold((Decimal::ZERO, 0), |(sum, count), e| (sum + e.amount, count + 1));

    line_from_totals(budget, total_spent, expense_count)
}

/// Build the dashboard summary for `year`.
///
/// `budgets` should already be the year's items; `expenses` may be the full
/// set, since expenses of other years simply match no line.
pub fn summarize_year(year: i32, budgets: &[BudgetItem], expenses: &[Expense]) -> YearSummary {
    let spend = spend_by_budget(expenses);

    let mut sorted: Vec<&BudgetItem> = budgets.iter().collect();
    sorted.sort_by(|a, b| compare_budgets(a, b));

    let lines: Vec<BudgetLine> = sorted
        .into_iter()
        .map(|budget| {
            let (total_spent, count) = spend
                .get(budget.id.as_str())
                .copied()
                .unwrap_or((Decimal::ZERO, 0));
            line_from_totals(budget, total_spent, count)
        })
        .collect();

    let total_budget: Decimal = lines.iter().map(|l| l.budget.budget_amount).sum();
    let total_spent: Decimal = lines.iter().map(|l| l.total_spent).sum();

    YearSummary {
        year,
        lines,
        total_budget,
        total_spent,
        total_remaining: total_budget - total_spent,
    }
}

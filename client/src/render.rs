//! Plain-text rendering of the three views.

use rust_decimal::Decimal;
use shared::{BudgetItem, BudgetLine, ExpenseListingResponse, YearSummary};

const NOT_APPLICABLE: &str = "N/A";

fn money(amount: Decimal) -> String {
    format!("${:.2}", amount)
}

/// "$X remaining" or "$X over"
fn balance(line: &BudgetLine) -> String {
    if line.over_budget {
        format!("{} over", money(-line.remaining))
    } else {
        format!("{} remaining", money(line.remaining))
    }
}

fn expense_count(count: usize) -> String {
    match count {
        1 => "1 expense".to_string(),
        n => format!("{} expenses", n),
    }
}

fn percent(line: &BudgetLine) -> String {
    match line.percent_used {
        Some(p) => format!("{:.2}%", p),
        None => NOT_APPLICABLE.to_string(),
    }
}

/// Header line listing the years, with the selected one in brackets
pub fn render_years(years: &[i32], selected: Option<i32>) -> String {
    if years.is_empty() {
        return "No budget years yet".to_string();
    }
    let labels: Vec<String> = years
        .iter()
        .map(|y| {
            if Some(*y) == selected {
                format!("[{}]", y)
            } else {
                y.to_string()
            }
        })
        .collect();
    format!("Years: {}", labels.join(" "))
}

pub fn render_dashboard(summary: Option<&YearSummary>) -> String {
    let Some(summary) = summary else {
        return "No budgets configured. Add one with `budgets add`.\n".to_string();
    };
    if summary.lines.is_empty() {
        return format!("No budgets for {}\n", summary.year);
    }

    let mut out = format!("Dashboard {}\n", summary.year);
    out.push_str(&format!(
        "{:<24} {:<12} {:>12} {:>12} {:>9}  {:<12} {}\n",
        "Budget", "Category", "Budget", "Spent", "Used", "Expenses", "Balance"
    ));
    for line in &summary.lines {
        let marker = if line.over_budget { " !" } else { "" };
        out.push_str(&format!(
            "{:<24} {:<12} {:>12} {:>12} {:>9}  {:<12} {}{}\n",
            line.budget.name,
            line.budget.expense_type,
            money(line.budget.budget_amount),
            money(line.total_spent),
            percent(line),
            expense_count(line.expense_count),
            balance(line),
            marker
        ));
    }
    out.push_str(&format!(
        "{:<37} {:>12} {:>12}  remaining {}\n",
        "Total",
        money(summary.total_budget),
        money(summary.total_spent),
        money(summary.total_remaining)
    ));
    out
}

pub fn render_expenses(listing: Option<&ExpenseListingResponse>) -> String {
    let Some(listing) = listing else {
        return "No expenses loaded\n".to_string();
    };

    let categories: Vec<&str> = listing.category_options.iter().map(|c| c.as_str()).collect();
    let mut out = format!(
        "Names: {}\nCategories: {}\n",
        listing.name_options.join(", "),
        categories.join(", ")
    );

    if listing.expenses.is_empty() {
        out.push_str("No expenses\n");
        return out;
    }

    for row in &listing.expenses {
        let category = row.expense_type.map(|c| c.as_str()).unwrap_or("-");
        out.push_str(&format!(
            "{}  {:<24} {:<12} {:<32} {:>12}  {}\n",
            row.expense.expense_date,
            row.budget_name,
            category,
            row.expense.description,
            money(row.expense.amount),
            row.expense.id
        ));
    }
    out.push_str(&format!("Total: {}\n", money(listing.total_amount)));
    out
}

/// Budget configuration, grouped by year (input is already year-descending)
pub fn render_budgets(budgets: &[BudgetItem]) -> String {
    if budgets.is_empty() {
        return "No budgets configured\n".to_string();
    }

    let mut out = String::new();
    let mut current_year = None;
    for budget in budgets {
        if current_year != Some(budget.year) {
            current_year = Some(budget.year);
            out.push_str(&format!("{}\n", budget.year));
        }
        out.push_str(&format!(
            "  {:<24} {:<12} {:>12}  {}\n",
            budget.name,
            budget.expense_type,
            money(budget.budget_amount),
            budget.id
        ));
    }
    out
}

//! Which budget years exist, and which one a client should show first.

use shared::{AvailableYearsResponse, BudgetItem};

/// Distinct years across `budgets`, most recent first
pub fn available_years(budgets: &[BudgetItem]) -> Vec<i32> {
    let mut years: Vec<i32> = budgets.iter().map(|b| b.year).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

/// Keep an explicit selection; otherwise fall back to the most recent year
pub fn resolve_selected_year(years: &[i32], selected: Option<i32>) -> Option<i32> {
    selected.or_else(|| years.first().copied())
}

pub fn years_response(budgets: &[BudgetItem]) -> AvailableYearsResponse {
    let years = available_years(budgets);
    let default_year = resolve_selected_year(&years, None);
    AvailableYearsResponse { years, default_year }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::ExpenseType;

    fn budget_in(year: i32) -> BudgetItem {
        BudgetItem {
            id: format!("b{}", year),
            year,
            name: "Mom".to_string(),
            expense_type: ExpenseType::Gifts,
            budget_amount: Decimal::ONE,
        }
    }

    #[test]
    fn test_years_are_distinct_and_descending() {
        let budgets = vec![budget_in(2022), budget_in(2024), budget_in(2023), budget_in(2024)];

        assert_eq!(available_years(&budgets), vec![2024, 2023, 2022]);
    }

    #[test]
    fn test_most_recent_year_is_default() {
        let response = years_response(&[budget_in(2023), budget_in(2025)]);

        assert_eq!(response.years, vec![2025, 2023]);
        assert_eq!(response.default_year, Some(2025));
    }

    #[test]
    fn test_explicit_selection_wins() {
        assert_eq!(resolve_selected_year(&[2025, 2023], Some(2023)), Some(2023));
        assert_eq!(resolve_selected_year(&[], Some(2023)), Some(2023));
    }

    #[test]
    fn test_no_budgets_means_no_year() {
        let response = years_response(&[]);

        assert!(response.years.is_empty());
        assert_eq!(response.default_year, None);
    }
}

//! One handler per subcommand. Each drives [`AppState`] and returns the text
//! to print.

use anyhow::{bail, Result};
use dialoguer::{theme::ColorfulTheme, Confirm};
use shared::{BudgetItemRequest, CreateExpenseRequest};
use tracing::debug;

use crate::api::BudgetApi;
use crate::args::{
    AddExpenseArgs, BudgetArgs, BudgetsCommand, Command, DeleteArgs, ExpensesCommand,
    ListExpensesArgs,
};
use crate::render;
use crate::state::{AppState, View};

/// Ask before deleting unless `--yes` was given
fn confirm_delete(what: &str, args: &DeleteArgs) -> Result<bool> {
    if args.yes {
        return Ok(true);
    }
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Delete {} {}?", what, args.id))
        .default(false)
        .interact()?;
    Ok(confirmed)
}

fn budget_request(args: &BudgetArgs) -> BudgetItemRequest {
    BudgetItemRequest {
        year: args.year,
        name: args.name.clone(),
        expense_type: args.category,
        budget_amount: args.amount,
    }
}

pub async fn run<A: BudgetApi>(state: &mut AppState<A>, command: &Command) -> Result<String> {
    debug!("Running {:?}", command);
    match command {
        Command::Dashboard { year } => dashboard(state, *year).await,
        Command::Years => {
            state.load_years().await;
            Ok(render::render_years(state.years(), state.selected_year()))
        }
        Command::Expenses(ExpensesCommand::List(args)) => list_expenses(state, args).await,
        Command::Expenses(ExpensesCommand::Add(args)) => add_expense(state, args).await,
        Command::Expenses(ExpensesCommand::Delete(args)) => {
            let confirmed = confirm_delete("expense", args)?;
            delete_expense(state, args, confirmed).await
        }
        Command::Budgets(BudgetsCommand::List) => {
            state.show(View::Config).await;
            Ok(render::render_budgets(state.budgets()))
        }
        Command::Budgets(BudgetsCommand::Add(args)) => {
            state.show(View::Config).await;
            match state.create_budget(budget_request(args)).await {
                Some(budget) => Ok(format!("Added budget {}\n{}", budget.id, render::render_budgets(state.budgets()))),
                None => bail!("Failed to add budget {}", args.name),
            }
        }
        Command::Budgets(BudgetsCommand::Edit { id, budget }) => {
            state.show(View::Config).await;
            match state.update_budget(id, budget_request(budget)).await {
                Some(updated) => Ok(format!("Updated budget {}\n{}", updated.id, render::render_budgets(state.budgets()))),
                None => bail!("Failed to update budget {}", id),
            }
        }
        Command::Budgets(BudgetsCommand::Delete(args)) => {
            let confirmed = confirm_delete("budget", args)?;
            delete_budget(state, args, confirmed).await
        }
    }
}

pub async fn dashboard<A: BudgetApi>(state: &mut AppState<A>, year: Option<i32>) -> Result<String> {
    state.show(View::Dashboard).await;
    if let Some(year) = year {
        state.select_year(year).await;
    }
    Ok(format!(
        "{}\n{}",
        render::render_years(state.years(), state.selected_year()),
        render::render_dashboard(state.summary())
    ))
}

pub async fn list_expenses<A: BudgetApi>(state: &mut AppState<A>, args: &ListExpensesArgs) -> Result<String> {
    state.show(View::Expenses).await;
    if let Some(year) = args.year {
        state.select_year(year).await;
    }
    if args.all_years {
        state.set_all_years(true).await;
    }
    if args.name.is_some() {
        state.set_name_filter(args.name.clone()).await;
    }
    if args.category.is_some() {
        state.set_category_filter(args.category).await;
    }
    if args.order != state.order() {
        state.set_order(args.order).await;
    }
    Ok(render::render_expenses(state.listing()))
}

pub async fn add_expense<A: BudgetApi>(state: &mut AppState<A>, args: &AddExpenseArgs) -> Result<String> {
    let request = CreateExpenseRequest {
        budget_item_id: args.budget_id.clone(),
        expense_date: args.date,
        description: args.description.clone(),
        amount: args.amount,
    };
    state.show(View::Expenses).await;
    match state.create_expense(request).await {
        Some(expense) => Ok(format!(
            "Recorded expense {}\n{}",
            expense.id,
            render::render_expenses(state.listing())
        )),
        None => bail!("Failed to record expense against budget {}", args.budget_id),
    }
}

pub async fn delete_expense<A: BudgetApi>(
    state: &mut AppState<A>,
    args: &DeleteArgs,
    confirmed: bool,
) -> Result<String> {
    if !confirmed {
        return Ok("Cancelled".to_string());
    }
    state.show(View::Expenses).await;
    if state.delete_expense(&args.id, confirmed).await {
        Ok(format!("Deleted expense {}", args.id))
    } else {
        bail!("Failed to delete expense {}", args.id)
    }
}

pub async fn delete_budget<A: BudgetApi>(
    state: &mut AppState<A>,
    args: &DeleteArgs,
    confirmed: bool,
) -> Result<String> {
    if !confirmed {
        return Ok("Cancelled".to_string());
    }
    state.show(View::Config).await;
    if state.delete_budget(&args.id, confirmed).await {
        Ok(format!("Deleted budget {}", args.id))
    } else {
        bail!("Failed to delete budget {}", args.id)
    }
}

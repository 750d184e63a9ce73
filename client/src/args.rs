//! Command line interface of the `xmas-xpenses` client.

use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};
use rust_decimal::Decimal;
use shared::{ExpenseOrder, ExpenseType};
use tracing_subscriber::filter::LevelFilter;

use crate::api::DEFAULT_API_URL;

/// xmas-xpenses: plan and track holiday spending against per-year budgets.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    #[command(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Debug, Clone, ClapArgs)]
pub struct Common {
    /// Base URL of the xmas-xpenses server
    #[arg(long, env = "XMAS_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// The logging verbosity. One of:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,
}

impl Common {
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Spend-vs-budget summary for a year
    Dashboard {
        /// Year to show; defaults to the most recent year with budgets
        #[arg(long)]
        year: Option<i32>,
    },

    /// List, record or delete expenses
    #[command(subcommand)]
    Expenses(ExpensesCommand),

    /// List, add, edit or delete budget line items
    #[command(subcommand)]
    Budgets(BudgetsCommand),

    /// Show the years that have budgets
    Years,
}

#[derive(Debug, Subcommand)]
pub enum ExpensesCommand {
    /// List expenses, optionally narrowed by budget name and category
    List(ListExpensesArgs),
    /// Record an expense against a budget item
    Add(AddExpenseArgs),
    /// Delete an expense
    Delete(DeleteArgs),
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ListExpensesArgs {
    /// Year whose budgets the listing is scoped to
    #[arg(long, conflicts_with = "all_years")]
    pub year: Option<i32>,

    /// List expenses of every year, including those whose budget was deleted
    #[arg(long)]
    pub all_years: bool,

    /// Only expenses of budgets with this name
    #[arg(long)]
    pub name: Option<String>,

    /// Only expenses of budgets in this category
    #[arg(long)]
    pub category: Option<ExpenseType>,

    /// date (newest first) or budget (by budget name, then category)
    #[arg(long, default_value_t = ExpenseOrder::Date)]
    pub order: ExpenseOrder,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct AddExpenseArgs {
    /// Id of the budget item the expense is charged to
    #[arg(long)]
    pub budget_id: String,

    /// Date of the expense, YYYY-MM-DD
    #[arg(long)]
    pub date: NaiveDate,

    #[arg(long)]
    pub description: String,

    #[arg(long)]
    pub amount: Decimal,
}

#[derive(Debug, Subcommand)]
pub enum BudgetsCommand {
    /// List every budget item grouped by year
    List,
    /// Add a budget line item
    Add(BudgetArgs),
    /// Replace the fields of an existing budget line item
    Edit {
        /// Id of the budget item to change
        id: String,
        #[command(flatten)]
        budget: BudgetArgs,
    },
    /// Delete a budget item. Its expenses are kept and show as "Unknown".
    Delete(DeleteArgs),
}

#[derive(Debug, Clone, ClapArgs)]
pub struct BudgetArgs {
    #[arg(long)]
    pub year: i32,

    /// Recipient or theme, e.g. "Mom" or "Tree"
    #[arg(long)]
    pub name: String,

    /// Gifts, Stocking, Decorations or Other
    #[arg(long, default_value_t = ExpenseType::Gifts)]
    pub category: ExpenseType,

    #[arg(long)]
    pub amount: Decimal,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct DeleteArgs {
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

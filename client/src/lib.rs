//! # Xmas Xpenses Client
//!
//! Command-line front end for the budget tracker. [`api`] talks to the
//! server, [`state`] holds the explicit application state (view, selected
//! year, filters, loaded data), [`render`] turns that state into text and
//! [`commands`] maps each subcommand onto state operations.

pub mod api;
pub mod args;
pub mod commands;
pub mod render;
pub mod state;

pub use api::{ApiClient, ApiError, BudgetApi};
pub use state::{AppState, View};

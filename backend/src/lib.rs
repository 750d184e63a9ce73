//! # Xmas Xpenses Backend
//!
//! REST backend for planning holiday spending: budget line items per year,
//! expenses recorded against them, and the dashboard and listing views
//! derived from both.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST handlers, axum)
//!     ↓
//! Domain Layer (services, aggregation, filtering)
//!     ↓
//! Storage Layer (SQLite repositories)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub use config::Config;
use domain::{BudgetService, ExpenseService, ReportService};
use storage::DbConnection;

/// Services shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub budget_service: BudgetService<DbConnection>,
    pub expense_service: ExpenseService<DbConnection>,
    pub report_service: ReportService<DbConnection>,
}

impl AppState {
    pub fn new(db_conn: Arc<DbConnection>) -> Self {
        Self {
            budget_service: BudgetService::new(db_conn.clone()),
            expense_service: ExpenseService::new(db_conn.clone()),
            report_service: ReportService::new(db_conn),
        }
    }
}

/// Open the database and wire up the services
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url());
    let db_conn = DbConnection::new(config.database_url())
        .await
        .with_context(|| format!("Failed to open database {}", config.database_url()))?;

    info!("Setting up application state");
    Ok(AppState::new(Arc::new(db_conn)))
}

/// Create the Axum router with every API nested under `/api`
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin '{}'", cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .merge(io::budget_apis::router())
        .merge(io::expense_apis::router())
        .merge(io::report_apis::router())
        .merge(io::health_apis::router());

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_router_rejects_bad_origin() {
        let db = Arc::new(DbConnection::init_test().await.unwrap());

        assert!(create_router(AppState::new(db), "bad\norigin").is_err());
    }

    #[tokio::test]
    async fn test_initialize_backend_in_memory() {
        let config = Config::new(
            format!("file:memdb_{}?mode=memory&cache=shared", uuid::Uuid::new_v4()),
            "127.0.0.1:0",
            "http://localhost:8080",
        );

        let state = initialize_backend(&config).await.unwrap();

        assert!(state.budget_service.list_budgets().await.unwrap().is_empty());
    }
}

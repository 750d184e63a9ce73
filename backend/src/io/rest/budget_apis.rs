//! # REST API for Budget Items
//!
//! CRUD endpoints for the per-year budget line items.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use tracing::info;

use super::{error_response, rejection_response};
use crate::AppState;
use shared::BudgetItemRequest;

/// Create the budget API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route("/budgets/year/:year", get(list_budgets_for_year))
        .route("/budgets/:id", put(update_budget).delete(delete_budget))
}

/// List every budget item, most recent year first
pub async fn list_budgets(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/budgets");

    match state.budget_service.list_budgets().await {
        Ok(budgets) => (StatusCode::OK, Json(budgets)).into_response(),
        Err(e) => error_response("list budgets", e),
    }
}

pub async fn list_budgets_for_year(
    State(state): State<AppState>,
    year: Result<Path<i32>, PathRejection>,
) -> impl IntoResponse {
    let Path(year) = match year {
        Ok(year) => year,
        Err(rejection) => return rejection_response("list budgets for year", rejection),
    };
    info!("GET /api/budgets/year/{}", year);

    match state.budget_service.list_budgets_for_year(year).await {
        Ok(budgets) => (StatusCode::OK, Json(budgets)).into_response(),
        Err(e) => error_response("list budgets for year", e),
    }
}

pub async fn create_budget(
    State(state): State<AppState>,
    request: Result<Json<BudgetItemRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => return rejection_response("create budget", rejection),
    };
    info!("POST /api/budgets - request: {:?}", request);

    match state.budget_service.create_budget(request).await {
        Ok(budget) => (StatusCode::CREATED, Json(budget)).into_response(),
        Err(e) => error_response("create budget", e),
    }
}

pub async fn update_budget(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<BudgetItemRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => return rejection_response("update budget", rejection),
    };
    info!("PUT /api/budgets/{} - request: {:?}", id, request);

    match state.budget_service.update_budget(&id, request).await {
        Ok(budget) => (StatusCode::OK, Json(budget)).into_response(),
        Err(e) => error_response("update budget", e),
    }
}

/// Delete a budget item; expenses recorded against it are kept
pub async fn delete_budget(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("DELETE /api/budgets/{}", id);

    match state.budget_service.delete_budget(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("delete budget", e),
    }
}

//! # REST API for Reports
//!
//! Read-only views: available years, the yearly dashboard summary and the
//! filtered expense listing.

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::info;

use super::{error_response, rejection_response};
use crate::AppState;
use shared::ExpenseListingRequest;

/// Create the report API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/years", get(get_available_years))
        .route("/summary/:year", get(get_year_summary))
        .route("/expense-listing", get(get_expense_listing))
}

/// Distinct budget years plus the one to select by default
pub async fn get_available_years(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/years");

    match state.report_service.available_years().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response("list available years", e),
    }
}

pub async fn get_year_summary(
    State(state): State<AppState>,
    year: Result<Path<i32>, PathRejection>,
) -> impl IntoResponse {
    let Path(year) = match year {
        Ok(year) => year,
        Err(rejection) => return rejection_response("summarize year", rejection),
    };
    info!("GET /api/summary/{}", year);

    match state.report_service.year_summary(year).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => error_response("summarize year", e),
    }
}

pub async fn get_expense_listing(
    State(state): State<AppState>,
    query: Result<Query<ExpenseListingRequest>, QueryRejection>,
) -> impl IntoResponse {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return rejection_response("build expense listing", rejection),
    };
    info!("GET /api/expense-listing - query: {:?}", query);

    match state.report_service.expense_listing(query).await {
        Ok(listing) => (StatusCode::OK, Json(listing)).into_response(),
        Err(e) => error_response("build expense listing", e),
    }
}

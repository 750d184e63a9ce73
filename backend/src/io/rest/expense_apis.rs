//! # REST API for Expenses
//!
//! Expenses are listed, recorded and deleted; there is no edit endpoint.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get},
    Router,
};
use tracing::info;

use super::{error_response, rejection_response};
use crate::AppState;
use shared::CreateExpenseRequest;

/// Create the expense API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/:id", delete(delete_expense))
}

/// List every expense, newest first
pub async fn list_expenses(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/expenses");

    match state.expense_service.list_expenses().await {
        Ok(expenses) => (StatusCode::OK, Json(expenses)).into_response(),
        Err(e) => error_response("list expenses", e),
    }
}

pub async fn create_expense(
    State(state): State<AppState>,
    request: Result<Json<CreateExpenseRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => return rejection_response("create expense", rejection),
    };
    info!("POST /api/expenses - request: {:?}", request);

    match state.expense_service.create_expense(request).await {
        Ok(expense) => (StatusCode::CREATED, Json(expense)).into_response(),
        Err(e) => error_response("create expense", e),
    }
}

pub async fn delete_expense(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("DELETE /api/expenses/{}", id);

    match state.expense_service.delete_expense(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("delete expense", e),
    }
}

#[cfg(test)]
mod tests {
    use crate::io::rest::test_support::{parse, send, setup_test_app};
    use axum::http::{Method, StatusCode};
    use axum::Router;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use shared::{BudgetItem, ErrorResponse, Expense};

    async fn create_budget(app: &Router) -> BudgetItem {
        let body = json!({
            "year": 2024,
            "name": "Mom",
            "expenseType": "Gifts",
            "budgetAmount": 100
        });
        let (_, bytes) = send(app, Method::POST, "/api/budgets", Some(body)).await;
        parse(&bytes)
    }

    fn expense_body(budget_id: &str, date: &str, amount: f64) -> serde_json::Value {
        json!({
            "budgetItemId": budget_id,
            "expenseDate": date,
            "description": "Sweater",
            "amount": amount
        })
    }

    #[tokio::test]
    async fn test_create_and_list_expenses() {
        let app = setup_test_app().await;
        let budget = create_budget(&app).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/expenses",
            Some(expense_body(&budget.id, "2024-12-01", 40.0)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let created: Expense = parse(&body);
        assert_eq!(created.expense_date, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(created.amount, dec!(40));

        send(&app, Method::POST, "/api/expenses", Some(expense_body(&budget.id, "2024-12-20", 70.0))).await;

        let (status, body) = send(&app, Method::GET, "/api/expenses", None).await;
        assert_eq!(status, StatusCode::OK);
        let expenses: Vec<Expense> = parse(&body);
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].expense_date, NaiveDate::from_ymd_opt(2024, 12, 20).unwrap());
    }

    #[tokio::test]
    async fn test_create_expense_for_unknown_budget() {
        let app = setup_test_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/expenses",
            Some(expense_body("missing", "2024-12-01", 5.0)),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = parse(&body);
        assert_eq!(error.code, "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_delete_expense() {
        let app = setup_test_app().await;
        let budget = create_budget(&app).await;
        let (_, body) = send(
            &app,
            Method::POST,
            "/api/expenses",
            Some(expense_body(&budget.id, "2024-12-01", 40.0)),
        )
        .await;
        let created: Expense = parse(&body);

        let uri = format!("/api/expenses/{}", created.id);
        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_expense_body_is_invalid_input() {
        let app = setup_test_app().await;
        let budget = create_budget(&app).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/expenses",
            Some(expense_body(&budget.id, "12/01/2024", 5.0)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = parse(&body);
        assert_eq!(error.code, "INVALID_INPUT");

        let (status, body) = send(&app, Method::POST, "/api/expenses", Some(json!({ "amount": 5 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(parse::<ErrorResponse>(&body).code, "INVALID_INPUT");

        let (_, body) = send(&app, Method::GET, "/api/expenses", None).await;
        assert!(parse::<Vec<Expense>>(&body).is_empty());
    }

    #[tokio::test]
    async fn test_oversized_amounts_are_rejected_and_summary_still_works() {
        let app = setup_test_app().await;
        let budget = create_budget(&app).await;

        for _ in 0..2 {
            let (status, body) = send(
                &app,
                Method::POST,
                "/api/expenses",
                Some(expense_body(&budget.id, "2024-12-01", 5e28)),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(parse::<ErrorResponse>(&body).code, "INVALID_INPUT");
        }

        let (status, _) = send(&app, Method::GET, "/api/summary/2024", None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::GET, "/api/expense-listing", None).await;
        assert_eq!(status, StatusCode::OK);
    }
}

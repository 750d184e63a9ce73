//! HTTP client for the backend REST API.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    AvailableYearsResponse, BudgetItem, BudgetItemRequest, CreateExpenseRequest, ErrorResponse,
    Expense, ExpenseListingRequest, ExpenseListingResponse, YearSummary,
};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned {status}: {message}")]
    Status { url: String, status: u16, message: String },
    #[error("Could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Everything the client needs from the backend
#[async_trait]
pub trait BudgetApi: Send + Sync {
    async fn list_budgets(&self) -> ApiResult<Vec<BudgetItem>>;
    async fn list_budgets_for_year(&self, year: i32) -> ApiResult<Vec<BudgetItem>>;
    async fn create_budget(&self, request: &BudgetItemRequest) -> ApiResult<BudgetItem>;
    async fn update_budget(&self, id: &str, request: &BudgetItemRequest) -> ApiResult<BudgetItem>;
    async fn delete_budget(&self, id: &str) -> ApiResult<()>;

    async fn list_expenses(&self) -> ApiResult<Vec<Expense>>;
    async fn create_expense(&self, request: &CreateExpenseRequest) -> ApiResult<Expense>;
    async fn delete_expense(&self, id: &str) -> ApiResult<()>;

    async fn available_years(&self) -> ApiResult<AvailableYearsResponse>;
    async fn year_summary(&self, year: i32) -> ApiResult<YearSummary>;
    async fn expense_listing(&self, request: &ExpenseListingRequest) -> ApiResult<ExpenseListingResponse>;
}

/// API client for communicating with the backend server
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the server at `base_url` (without the `/api` suffix)
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn send(&self, url: &str, request: reqwest::RequestBuilder) -> ApiResult<Response> {
        debug!("Sending request to {}", url);
        let response = request.send().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;
        check_status(url, response).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        let response = self.send(&url, self.client.get(&url)).await?;
        decode(&url, response).await
    }

    async fn delete(&self, path: &str) -> ApiResult<()> {
        let url = self.url(path);
        self.send(&url, self.client.delete(&url)).await?;
        Ok(())
    }
}

/// Non-2xx responses become [`ApiError::Status`], carrying the server's message when it sent one
async fn check_status(url: &str, response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => status.canonical_reason().unwrap_or("Unknown error").to_string(),
    };
    Err(ApiError::Status {
        url: url.to_string(),
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> ApiResult<T> {
    response.json::<T>().await.map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}

#[async_trait]
impl BudgetApi for ApiClient {
    async fn list_budgets(&self) -> ApiResult<Vec<BudgetItem>> {
        self.get("/budgets").await
    }

    async fn list_budgets_for_year(&self, year: i32) -> ApiResult<Vec<BudgetItem>> {
        self.get(&format!("/budgets/year/{}", year)).await
    }

    async fn create_budget(&self, request: &BudgetItemRequest) -> ApiResult<BudgetItem> {
        let url = self.url("/budgets");
        let response = self.send(&url, self.client.post(&url).json(request)).await?;
        decode(&url, response).await
    }

    async fn update_budget(&self, id: &str, request: &BudgetItemRequest) -> ApiResult<BudgetItem> {
        let url = self.url(&format!("/budgets/{}", id));
        let response = self.send(&url, self.client.put(&url).json(request)).await?;
        decode(&url, response).await
    }

    async fn delete_budget(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/budgets/{}", id)).await
    }

    async fn list_expenses(&self) -> ApiResult<Vec<Expense>> {
        self.get("/expenses").await
    }

    async fn create_expense(&self, request: &CreateExpenseRequest) -> ApiResult<Expense> {
        let url = self.url("/expenses");
        let response = self.send(&url, self.client.post(&url).json(request)).await?;
        decode(&url, response).await
    }

    async fn delete_expense(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/expenses/{}", id)).await
    }

    async fn available_years(&self) -> ApiResult<AvailableYearsResponse> {
        self.get("/years").await
    }

    async fn year_summary(&self, year: i32) -> ApiResult<YearSummary> {
        self.get(&format!("/summary/{}", year)).await
    }

    async fn expense_listing(&self, request: &ExpenseListingRequest) -> ApiResult<ExpenseListingResponse> {
        let url = self.url("/expense-listing");
        let response = self.send(&url, self.client.get(&url).query(request)).await?;
        decode(&url, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use shared::{ExpenseOrder, ExpenseType};
    use xmas_xpenses_backend::{create_router, initialize_backend, Config};

    /// Serve a fresh in-memory backend on an ephemeral port
    async fn spawn_backend() -> ApiClient {
        let config = Config::new(
            format!("file:memdb_{}?mode=memory&cache=shared", uuid::Uuid::new_v4()),
            "127.0.0.1:0",
            "http://localhost:8080",
        );
        let state = initialize_backend(&config).await.unwrap();
        let app = create_router(state, config.cors_origin()).unwrap();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        ApiClient::new(&format!("http://{}/", addr)).unwrap()
    }

    fn budget_request(year: i32, name: &str) -> BudgetItemRequest {
        BudgetItemRequest {
            year,
            name: name.to_string(),
            expense_type: ExpenseType::Gifts,
            budget_amount: dec!(100),
        }
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:3000/").unwrap();

        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.url("/years"), "http://localhost:3000/api/years");
    }

    #[tokio::test]
    async fn test_budget_and_expense_round_trip() {
        let api = spawn_backend().await;

        let mom = api.create_budget(&budget_request(2024, "Mom")).await.unwrap();
        api.create_expense(&CreateExpenseRequest {
            budget_item_id: mom.id.clone(),
            expense_date: NaiveDate::from_ymd_opt(2024, 12, 5).unwrap(),
            description: "Scarf".to_string(),
            amount: dec!(40),
        })
        .await
        .unwrap();

        let years = api.available_years().await.unwrap();
        assert_eq!(years.default_year, Some(2024));

        let summary = api.year_summary(2024).await.unwrap();
        assert_eq!(summary.total_spent, dec!(40));
        assert_eq!(summary.lines[0].remaining, dec!(60));

        let listing = api
            .expense_listing(&ExpenseListingRequest {
                year: Some(2024),
                name: Some("Mom".to_string()),
                category: Some(ExpenseType::Gifts),
                order: ExpenseOrder::Budget,
            })
            .await
            .unwrap();
        assert_eq!(listing.expenses.len(), 1);
        assert_eq!(listing.expenses[0].budget_name, "Mom");
    }

    #[tokio::test]
    async fn test_server_errors_become_status_errors() {
        let api = spawn_backend().await;

        let err = api.create_budget(&budget_request(2024, " ")).await.unwrap_err();
        match err {
            ApiError::Status { status, message, .. } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Name cannot be empty");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = api.delete_budget("missing").await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let api = ApiClient::new("http://127.0.0.1:9").unwrap();

        let err = api.list_budgets().await.unwrap_err();

        assert!(matches!(err, ApiError::Transport { .. }));
    }
}

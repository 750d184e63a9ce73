use axum::{response::Json, routing::get, Router};
use shared::HealthResponse;
use tracing::debug;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

pub async fn health_check() -> Json<HealthResponse> {
    debug!("GET /api/health");
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

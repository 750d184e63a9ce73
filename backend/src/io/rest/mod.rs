//! # REST API Interface Layer
//!
//! HTTP endpoints for budgets, expenses and the derived reports. Handlers are
//! thin: they log the request, call one domain service and translate the
//! result. Domain failures are mapped to status codes here and nowhere else.

pub mod budget_apis;
pub mod expense_apis;
pub mod health_apis;
pub mod report_apis;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::ErrorResponse;
use std::fmt::Display;
use tracing::{error, warn};

use crate::domain::DomainError;

pub const INVALID_INPUT: &str = "INVALID_INPUT";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// Translate a service failure into the JSON error body and status code.
///
/// `action` is only used for the log line, e.g. "create budget".
pub fn error_response(action: &str, err: anyhow::Error) -> Response {
    let (status, code, message) = match err.downcast_ref::<DomainError>() {
        Some(DomainError::Validation(v)) => (StatusCode::BAD_REQUEST, INVALID_INPUT, v.to_string()),
        Some(not_found @ DomainError::NotFound { .. }) => {
            (StatusCode::NOT_FOUND, NOT_FOUND, not_found.to_string())
        }
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            INTERNAL_ERROR,
            "Internal server error".to_string(),
        ),
    };

    error!("Failed to {}: {:#}", action, err);

    let body = ErrorResponse {
        error: message,
        code: code.to_string(),
    };
    (status, Json(body)).into_response()
}

/// A body, query string or path segment that could not be parsed is invalid
/// input like any other, so it gets the same JSON body as a validation failure.
pub fn rejection_response(action: &str, rejection: impl Display) -> Response {
    warn!("Rejected request to {}: {}", action, rejection);

    let body = ErrorResponse {
        error: rejection.to_string(),
        code: INVALID_INPUT.to_string(),
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

//! API error type and its JSON response mapping.

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use drug_loader::QueryError;
use serde::Serialize;

/// Error response body: `{"error": "<message>"}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}

/// Errors surfaced to API clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request was missing a required parameter or had too few items.
    #[error(transparent)]
    InvalidInput(#[from] QueryError),

    /// The query string could not be decoded into the route's parameters.
    #[error("Invalid query string: {}", .0.body_text())]
    InvalidQuery(#[from] QueryRejection),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidQuery(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(%status, error = %self, "Rejected request");

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

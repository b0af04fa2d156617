use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::quiz::GenerationError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid category ID: {0}")]
    InvalidCategory(String),

    #[error("Invalid request: {0:#}")]
    InvalidRequest(anyhow::Error),

    #[error("{}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),

    #[error("Failed to generate quiz: {0}")]
    Generation(#[from] GenerationError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidCategory(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidBody(rejection) => rejection.status(),
            ApiError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::info!(error = %self, "rejected request");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use service::errors::ServiceError;

/// Client-facing error taxonomy of the repository API.
///
/// Every variant answers 400. Not-found deliberately stays at 400 rather
/// than 404; existing clients rely on that contract.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid repository id.")]
    InvalidId,
    #[error("Repository not found.")]
    NotFound,
    #[error("Invalid request body")]
    InvalidBody,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::BAD_REQUEST;
        // body-validation failures use a `message` key, lookup failures `error`
        let body = match self {
            ApiError::InvalidBody => serde_json::json!({"message": self.to_string()}),
            _ => serde_json::json!({"error": self.to_string()}),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(_) => ApiError::NotFound,
            ServiceError::Model(_) => ApiError::InvalidBody,
        }
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Key-value store unavailable: {0}")]
    Unavailable(String),
    #[error("Stored {key} entry cannot be updated: {reason}")]
    Corrupt { key: String, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum PlanRequestError {
    #[error("Plan backend returned HTTP {status}")]
    Http { status: u16 },
    #[error("Plan backend unreachable: {0}")]
    Transport(String),
    #[error("Plan backend response could not be decoded: {0}")]
    Decode(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Chat API key is not configured")]
    MissingApiKey,
    #[error("Chat API returned HTTP {status}")]
    Http { status: u16 },
    #[error("Chat API unreachable: {0}")]
    Transport(String),
    #[error("Chat API response could not be decoded: {0}")]
    Decode(String),
    #[error("Unexpected response structure from chat API")]
    UnexpectedShape,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Store(StoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Store(StoreError::Corrupt { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

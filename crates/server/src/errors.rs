use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roster::StoreError;
use serde_json::json;
use tracing::{error, warn};

/// A custom error type for the server application.
///
/// Each variant maps onto one HTTP status, so handlers can return `Result<_, AppError>`
/// and rely on `?` for the conversion.
#[derive(Debug)]
pub enum AppError {
    /// Errors reported by the student store.
    Store(StoreError),
    /// A request body that could not be decoded.
    BadRequest(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Store(err) => match err {
                StoreError::InvalidInput { .. } => {
                    warn!("Rejected student input: {}", err);
                    (StatusCode::BAD_REQUEST, err.to_string())
                }
                StoreError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                StoreError::Unavailable(_) => {
                    error!("StoreError: {:?}", err);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "The data store is unavailable. Please try again.".to_string(),
                    )
                }
            },
            AppError::BadRequest(message) => {
                warn!("Malformed request: {}", message);
                (StatusCode::BAD_REQUEST, message)
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}

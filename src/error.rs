// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::store::StoreError;

/// HTTP API error with the status code and JSON envelope each failure kind
/// maps to. Client-input errors never reach the store; store-level and
/// unexpected errors are logged before translation.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request - rejected before any store call
    BadRequest(String),

    // 404 Not Found - produced only by explicit existence checks
    NotFound(String),

    // 500 - the store call itself reported failure
    Store {
        message: String,
        details: Option<String>,
    },

    // 500 - anything unexpected (transport failure, malformed response)
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn store(message: impl Into<String>) -> Self {
        ApiError::Store {
            message: message.into(),
            details: None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store { .. } | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            ApiError::BadRequest(message) | ApiError::NotFound(message) => {
                json!({ "error": message })
            }
            ApiError::Store {
                message,
                details: Some(details),
            } => json!({ "error": message, "details": details }),
            ApiError::Store {
                message,
                details: None,
            } => json!({ "error": message }),
            ApiError::Internal(details) => json!({
                "error": "An unexpected error occurred",
                "details": details,
            }),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Remote {
                status,
                message,
                details,
            } => {
                tracing::error!("store error (status {}): {}", status, message);
                ApiError::Store { message, details }
            }
            other => {
                tracing::error!("unexpected store failure: {}", other);
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(message)
            | ApiError::NotFound(message)
            | ApiError::Store { message, .. } => write!(f, "{}", message),
            ApiError::Internal(details) => write!(f, "An unexpected error occurred: {}", details),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

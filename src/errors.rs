use crate::messages::{INVALID_PAYLOAD, STORE_FAILED};
use crate::models::{ErrorBody, ValidationError};
use crate::storage::StoreError;
use axum::{Json, extract::rejection::JsonRejection, http::StatusCode};
use tracing::{error, warn};

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: String,
    pub message: String,
}

impl AppError {
    fn new(status: StatusCode, error: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            error: error.to_string(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, INVALID_PAYLOAD, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status: StatusCode::UNAUTHORIZED,
            error: message.clone(),
            message,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status: StatusCode::NOT_FOUND,
            error: message.clone(),
            message,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status: StatusCode::CONFLICT,
            error: message.clone(),
            message,
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, STORE_FAILED, err.to_string())
    }

    /// Labels the failure with the operation it interrupted, keeping the detail message.
    pub fn during(mut self, operation_failed: &str) -> Self {
        self.error = operation_failed.to_string();
        self
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::internal(err)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.0)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), INVALID_PAYLOAD, rejection.body_text())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        if self.status.is_server_error() {
            error!(status = %self.status, "{}: {}", self.error, self.message);
        } else {
            warn!(status = %self.status, "{}: {}", self.error, self.message);
        }

        let body = ErrorBody {
            error: self.error,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

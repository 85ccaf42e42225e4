use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::auth_service::AuthServiceError;
use crate::services::catalog_service::CatalogServiceError;
use crate::services::payment_service::PaymentServiceError;

// Type alias for Result with our AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Failure taxonomy for the REST surface. Every variant carries a message
/// fit for direct display; internals are logged, never returned.
#[derive(Error, Debug)]
pub enum AppError {
    /// The resource already exists (registration against a taken email).
    #[error("{0}")]
    Conflict(String),

    /// No such identity or resource.
    #[error("{0}")]
    NotFound(String),

    /// Malformed or mismatched credential/input.
    #[error("{0}")]
    Invalid(String),

    /// A downstream collaborator (store, mailer) failed.
    #[error("{0}")]
    Unavailable(String),

    /// Anything unexpected. Reported as a plain server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Invalid(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unavailable(msg) => {
                tracing::error!("downstream failure: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::Internal(detail) => {
                tracing::error!("internal error: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<AuthServiceError> for AppError {
    fn from(err: AuthServiceError) -> Self {
        match err {
            AuthServiceError::EmailTaken => AppError::Conflict(err.to_string()),
            AuthServiceError::UserNotFound => AppError::NotFound(err.to_string()),
            AuthServiceError::NoSuchCode | AuthServiceError::InvalidCode => {
                AppError::Invalid(err.to_string())
            }
            AuthServiceError::MissingFields => AppError::Invalid(err.to_string()),
            AuthServiceError::Email(e) => {
                AppError::Unavailable(format!("Failed to send OTP email: {}", e))
            }
            AuthServiceError::HashingError(_)
            | AuthServiceError::Token(_)
            | AuthServiceError::Repository(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<CatalogServiceError> for AppError {
    fn from(err: CatalogServiceError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<PaymentServiceError> for AppError {
    fn from(err: PaymentServiceError) -> Self {
        match err {
            PaymentServiceError::Repository(_) | PaymentServiceError::IdExhausted => {
                AppError::Unavailable("Payment processing failed".to_string())
            }
        }
    }
}

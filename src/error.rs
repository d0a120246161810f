// SPDX-License-Identifier: MIT

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Fill all input fields")]
    MissingField,

    #[error("CAPTCHA verification failed")]
    CaptchaFailed,

    #[error("Invalid username or verification code")]
    InvalidCode,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("User not found or not verified")]
    UnknownAccount,

    #[error("Password is incorrect")]
    BadCredential,

    #[error("Admin access required")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("{0} service error: {1}")]
    ExternalService(&'static str, String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::MissingField => (StatusCode::BAD_REQUEST, "missing_field", None),
            AppError::CaptchaFailed => (StatusCode::BAD_REQUEST, "captcha_failed", None),
            AppError::InvalidCode => (StatusCode::BAD_REQUEST, "invalid_code", None),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token", None),
            AppError::UnknownAccount => (StatusCode::UNAUTHORIZED, "unknown_account", None),
            AppError::BadCredential => (StatusCode::UNAUTHORIZED, "bad_credential", None),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "forbidden", None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::ExternalService(service, msg) => {
                tracing::error!(service, error = %msg, "External service error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "external_service_error",
                    Some(service.to_string()),
                )
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

// SPDX-License-Identifier: MIT

//! Error-to-status mapping tests.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use motorlot::error::AppError;

fn status_of(err: AppError) -> StatusCode {
    err.into_response().status()
}

#[test]
fn test_client_errors_map_to_400() {
    assert_eq!(status_of(AppError::MissingField), StatusCode::BAD_REQUEST);
    assert_eq!(status_of(AppError::CaptchaFailed), StatusCode::BAD_REQUEST);
    assert_eq!(status_of(AppError::InvalidCode), StatusCode::BAD_REQUEST);
    assert_eq!(
        status_of(AppError::BadRequest("nope".to_string())),
        StatusCode::BAD_REQUEST
    );
}

#[test]
fn test_auth_errors_map_to_401() {
    assert_eq!(status_of(AppError::Unauthorized), StatusCode::UNAUTHORIZED);
    assert_eq!(status_of(AppError::InvalidToken), StatusCode::UNAUTHORIZED);
    assert_eq!(status_of(AppError::UnknownAccount), StatusCode::UNAUTHORIZED);
    assert_eq!(status_of(AppError::BadCredential), StatusCode::UNAUTHORIZED);
}

#[test]
fn test_forbidden_and_not_found() {
    assert_eq!(status_of(AppError::Forbidden), StatusCode::FORBIDDEN);
    assert_eq!(
        status_of(AppError::NotFound("car c1".to_string())),
        StatusCode::NOT_FOUND
    );
}

#[test]
fn test_server_side_errors_map_to_500() {
    assert_eq!(
        status_of(AppError::ExternalService("mail", "timeout".to_string())),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        status_of(AppError::Database("offline".to_string())),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        status_of(AppError::Internal(anyhow::anyhow!("boom"))),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

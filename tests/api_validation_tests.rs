// SPDX-License-Identifier: MIT

//! Input validation tests for the public account endpoints.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

fn multipart_body(fields: &[(&str, &str)], boundary: &str) -> String {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            boundary, name, value
        ));
    }
    body.push_str(&format!("--{}--\r\n", boundary));
    body
}

async fn post_signup(fields: &[(&str, &str)]) -> StatusCode {
    let (app, _state) = common::create_test_app();
    let boundary = "XBOUNDARY";

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/user/signup")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", boundary),
                )
                .body(Body::from(multipart_body(fields, boundary)))
                .unwrap(),
        )
        .await
        .unwrap();

    response.status()
}

#[tokio::test]
async fn test_signup_rejects_missing_fields() {
    // No password
    let status = post_signup(&[
        ("email", "a@x.com"),
        ("username", "alice"),
        ("role", "user"),
    ])
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // No email
    let status = post_signup(&[
        ("username", "alice"),
        ("password", "pw"),
        ("role", "user"),
    ])
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Empty username counts as missing
    let status = post_signup(&[
        ("email", "a@x.com"),
        ("username", ""),
        ("password", "pw"),
        ("role", "user"),
    ])
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_rejects_bad_role_and_email() {
    let status = post_signup(&[
        ("email", "a@x.com"),
        ("username", "alice"),
        ("password", "pw"),
        ("role", "superuser"),
    ])
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let status = post_signup(&[
        ("email", "not-an-email"),
        ("username", "alice"),
        ("password", "pw"),
        ("role", "user"),
    ])
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

async fn post_json(uri: &str, body: serde_json::Value) -> StatusCode {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    response.status()
}

#[tokio::test]
async fn test_login_rejects_missing_fields() {
    // No captcha
    let status = post_json(
        "/user/login",
        serde_json::json!({"email": "a@x.com", "password": "pw"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // No password
    let status = post_json(
        "/user/login",
        serde_json::json!({"email": "a@x.com", "captcha": "tok"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Empty captcha counts as missing
    let status = post_json(
        "/user/login",
        serde_json::json!({"email": "a@x.com", "password": "pw", "captcha": ""}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_verify_rejects_missing_or_malformed_code() {
    let status = post_json("/user/verify/alice", serde_json::json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let status = post_json("/user/verify/alice", serde_json::json!({"code": "abc"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// SPDX-License-Identifier: MIT

//! HTTP route handlers.

pub mod address;
pub mod cars;
pub mod cart;
pub mod chat;
pub mod users;

use crate::middleware::auth::require_auth;
use crate::AppState;
use axum::http::{header, Method};
use axum::routing::{delete, get, post, put};
use axum::{middleware, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer - allow requests from frontend URL and localhost (for dev)
    let frontend_url = state.config.frontend_url.clone();
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            move |origin: &axum::http::HeaderValue, _request_parts: &axum::http::request::Parts| {
                let origin_str = origin.to_str().unwrap_or("");
                origin_str == frontend_url
                    || origin_str.starts_with("http://localhost")
                    || origin_str.starts_with("http://127.0.0.1")
            },
        ))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/user/signup", post(users::signup))
        .route("/user/verify/{username}", post(users::verify))
        .route("/user/login", post(users::login))
        .route("/car/allcars", get(cars::all_cars))
        .route("/car/car/{id}", get(cars::car_detail))
        .route("/paypal/payment", post(cart::create_payment))
        .route("/chat/ws", get(chat::chat_ws));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/user/profile", get(users::profile))
        .route("/user/update", put(users::update))
        .route("/user/delete", delete(users::delete_account))
        .route(
            "/user/address",
            post(address::add_address)
                .get(address::get_address)
                .put(address::update_address)
                .delete(address::delete_address),
        )
        .route("/cart/buy", post(cart::buy))
        .route("/car/addcar", post(cars::add_car))
        .route("/car/delete/{id}", delete(cars::delete_car))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

// SPDX-License-Identifier: MIT

//! Motorlot API Server
//!
//! Car dealership e-commerce backend: accounts with email verification,
//! car catalog, checkout with a payment-provider redirect, and realtime
//! buyer↔admin chat over WebSockets.

use motorlot::{
    chat::RoomRegistry,
    config::Config,
    db::FirestoreDb,
    services::{CaptchaClient, MailerClient, MediaClient, PaymentClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Motorlot API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // External service clients
    let captcha = CaptchaClient::new(
        config.captcha_verify_url.clone(),
        config.captcha_secret.clone(),
    );
    let mailer = MailerClient::new(
        config.mail_api_url.clone(),
        config.mail_api_key.clone(),
        config.mail_from.clone(),
    );
    let media = MediaClient::new(config.media_api_url.clone(), config.media_api_key.clone());
    let payment = PaymentClient::new(
        config.payment_api_url.clone(),
        config.payment_client_id.clone(),
        config.payment_client_secret.clone(),
    );
    tracing::info!("External service clients initialized");

    // Chat room registry, shared across all connections in this process
    let rooms = RoomRegistry::new();

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        captcha,
        mailer,
        media,
        payment,
        rooms,
    });

    // Build router
    let app = motorlot::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("motorlot=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}

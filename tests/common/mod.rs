// SPDX-License-Identifier: MIT

use motorlot::chat::RoomRegistry;
use motorlot::config::Config;
use motorlot::db::FirestoreDb;
use motorlot::routes::create_router;
use motorlot::services::{CaptchaClient, MailerClient, MediaClient, PaymentClient};
use motorlot::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db_offline();

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

    let state = Arc::new(AppState {
        config,
        db,
        captcha,
        mailer,
        media,
        payment,
        rooms: RoomRegistry::new(),
    });

    (create_router(state.clone()), state)
}

//! Application configuration loaded from environment variables.
//!
//! Secrets (token signing key, external API keys) are read once at startup
//! and held in memory; nothing re-reads the environment afterwards.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID for Firestore
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Session token lifetime in seconds
    pub token_ttl_secs: u64,
    /// Captcha verification endpoint
    pub captcha_verify_url: String,
    /// Mail delivery API base URL
    pub mail_api_url: String,
    /// Sender address for verification emails
    pub mail_from: String,
    /// Image storage API base URL
    pub media_api_url: String,
    /// Payment provider API base URL
    pub payment_api_url: String,
    /// Payment provider client ID (public)
    pub payment_client_id: String,

    // --- Secrets ---
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Captcha secret key
    pub captcha_secret: String,
    /// Mail delivery API key
    pub mail_api_key: String,
    /// Image storage API key
    pub media_api_key: String,
    /// Payment provider client secret
    pub payment_client_secret: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            // Non-sensitive config from env
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
            token_ttl_secs: env::var("TOKEN_TTL_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .unwrap_or(3600),
            captcha_verify_url: env::var("CAPTCHA_VERIFY_URL").unwrap_or_else(|_| {
                "https://www.google.com/recaptcha/api/siteverify".to_string()
            }),
            mail_api_url: env::var("MAIL_API_URL")
                .map_err(|_| ConfigError::Missing("MAIL_API_URL"))?,
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "noreply@motorlot.example".to_string()),
            media_api_url: env::var("MEDIA_API_URL")
                .map_err(|_| ConfigError::Missing("MEDIA_API_URL"))?,
            payment_api_url: env::var("PAYMENT_API_URL")
                .unwrap_or_else(|_| "https://api.sandbox.paypal.com".to_string()),
            payment_client_id: env::var("PAYMENT_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("PAYMENT_CLIENT_ID"))?,

            // Secrets - from env (or secret bindings injected as env vars)
            jwt_signing_key: env::var("SECRET_KEY")
                .map_err(|_| ConfigError::Missing("SECRET_KEY"))?
                .into_bytes(),
            captcha_secret: env::var("CAPTCHA_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("CAPTCHA_KEY"))?,
            mail_api_key: env::var("MAIL_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("MAIL_API_KEY"))?,
            media_api_key: env::var("MEDIA_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("MEDIA_API_KEY"))?,
            payment_client_secret: env::var("PAYMENT_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("PAYMENT_CLIENT_SECRET"))?,
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8000,
            token_ttl_secs: 3600,
            captcha_verify_url: "http://localhost:9/siteverify".to_string(),
            mail_api_url: "http://localhost:9/mail".to_string(),
            mail_from: "noreply@test.example".to_string(),
            media_api_url: "http://localhost:9/media".to_string(),
            payment_api_url: "http://localhost:9/payment".to_string(),
            payment_client_id: "test_payment_id".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!!".to_vec(),
            captcha_secret: "test_captcha_secret".to_string(),
            mail_api_key: "test_mail_key".to_string(),
            media_api_key: "test_media_key".to_string(),
            payment_client_secret: "test_payment_secret".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_default_is_complete() {
        let config = Config::test_default();

        assert_eq!(config.port, 8000);
        assert_eq!(config.token_ttl_secs, 3600);
        assert!(config.jwt_signing_key.len() >= 32);
        assert!(!config.captcha_secret.is_empty());
    }
}

// SPDX-License-Identifier: MIT

//! Captcha verification client (reCAPTCHA-style siteverify API).

use crate::error::AppError;
use serde::Deserialize;

/// Captcha verification client.
#[derive(Clone)]
pub struct CaptchaClient {
    http: reqwest::Client,
    verify_url: String,
    secret: String,
}

#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

impl CaptchaClient {
    pub fn new(verify_url: String, secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            verify_url,
            secret,
        }
    }

    /// Verify a client-supplied captcha token.
    ///
    /// Returns `Ok(true)` only when the external API reports success; a
    /// transport failure is an `ExternalService` error, not a rejection.
    pub async fn verify(&self, captcha_token: &str) -> Result<bool, AppError> {
        let response = self
            .http
            .post(&self.verify_url)
            .form(&[
                ("secret", self.secret.as_str()),
                ("response", captcha_token),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalService("captcha", e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(
                "captcha",
                format!("siteverify returned {}", response.status()),
            ));
        }

        let body: SiteVerifyResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService("captcha", e.to_string()))?;

        if !body.success {
            tracing::debug!(errors = ?body.error_codes, "Captcha rejected");
        }

        Ok(body.success)
    }
}

// SPDX-License-Identifier: MIT

//! Transactional mail client for verification emails.

use crate::error::AppError;

/// Mail delivery client.
#[derive(Clone)]
pub struct MailerClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    from: String,
}

impl MailerClient {
    pub fn new(base_url: String, api_key: String, from: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
            from,
        }
    }

    /// Send the signup verification code.
    ///
    /// A delivery failure aborts the signup; the caller must not persist
    /// anything if this returns an error.
    pub async fn send_verification_code(&self, to: &str, code: u32) -> Result<(), AppError> {
        let body = serde_json::json!({
            "from": self.from,
            "to": to,
            "subject": "Your Motorlot verification code",
            "text": format!(
                "Welcome to Motorlot!\n\nYour verification code is {}.\n",
                code
            ),
        });

        let response = self
            .http
            .post(format!("{}/send", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalService("mail", e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(
                "mail",
                format!("send returned {}: {}", status, text),
            ));
        }

        tracing::info!(to, "Verification email sent");
        Ok(())
    }
}

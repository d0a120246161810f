// SPDX-License-Identifier: MIT

//! Payment provider client for the online-payment redirect flow.
//!
//! Creates a payment at the provider and hands the approval links back to
//! the browser; the provider drives the rest of the flow on its own pages.

use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Payment provider client.
#[derive(Clone)]
pub struct PaymentClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
}

/// A HATEOAS-style link returned by the provider. The browser follows the
/// `approval_url` entry to complete payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentLink {
    pub href: String,
    pub rel: String,
    pub method: String,
}

/// The created payment, as returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedPayment {
    pub id: String,
    pub links: Vec<PaymentLink>,
}

impl PaymentClient {
    pub fn new(base_url: String, client_id: String, client_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            client_id,
            client_secret,
        }
    }

    /// Create a payment and return the provider's redirect links.
    ///
    /// No retry: a provider failure surfaces immediately and leaves no
    /// local state behind.
    pub async fn create_payment(
        &self,
        return_url: &str,
        cancel_url: &str,
    ) -> Result<CreatedPayment, AppError> {
        let body = serde_json::json!({
            "intent": "sale",
            "payer": { "payment_method": "paypal" },
            "redirect_urls": {
                "return_url": return_url,
                "cancel_url": cancel_url,
            },
        });

        let response = self
            .http
            .post(format!("{}/v1/payments/payment", self.base_url))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalService("payment", e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(
                "payment",
                format!("create payment returned {}: {}", status, text),
            ));
        }

        let payment: CreatedPayment = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService("payment", e.to_string()))?;

        tracing::info!(payment_id = %payment.id, "Payment created at provider");
        Ok(payment)
    }
}

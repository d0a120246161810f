// SPDX-License-Identifier: MIT

//! Checkout routes: order creation and the payment-provider redirect.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Order, PaymentMethod};
use crate::services::CreatedPayment;
use crate::AppState;
use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyRequest {
    ids: Option<Vec<String>>,
    payment_method: Option<PaymentMethod>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyResponse {
    pub message: String,
    pub order_id: String,
}

/// Create an order for the given car ids.
///
/// For online payment the client separately calls the payment endpoint and
/// follows the provider redirect; the order itself is identical either way.
pub async fn buy(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<BuyRequest>,
) -> Result<Json<BuyResponse>> {
    let (Some(car_ids), Some(payment_method)) = (req.ids, req.payment_method) else {
        return Err(AppError::MissingField);
    };
    if car_ids.is_empty() {
        return Err(AppError::BadRequest("No cars selected".to_string()));
    }

    for car_id in &car_ids {
        if state.db.get_car(car_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Car {} not found", car_id)));
        }
    }

    let order = Order {
        id: uuid::Uuid::new_v4().to_string(),
        buyer_id: auth.user_id.clone(),
        car_ids,
        payment_method,
        status: "accepted".to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    state.db.create_order(&order).await?;

    Ok(Json(BuyResponse {
        message: "Order accepted successfully".to_string(),
        order_id: order.id,
    }))
}

/// Create a payment at the provider and return its redirect links.
pub async fn create_payment(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CreatedPayment>> {
    let return_url = format!("{}/review", state.config.frontend_url);
    let cancel_url = format!("{}/pay", state.config.frontend_url);

    let payment = state.payment.create_payment(&return_url, &cancel_url).await?;
    Ok(Json(payment))
}

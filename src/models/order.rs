//! Order model for the checkout flow.

use serde::{Deserialize, Serialize};

/// How the buyer pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash on delivery
    Cod,
    /// Online payment via the provider redirect
    Upi,
}

/// Order stored in Firestore (document ID = `id`).
///
/// Created by `POST /cart/buy`; online payment is a separate redirect the
/// browser follows, so the order carries no provider state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub buyer_id: String,
    pub car_ids: Vec<String>,
    pub payment_method: PaymentMethod,
    pub status: String,
    pub created_at: String,
}

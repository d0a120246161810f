// SPDX-License-Identifier: MIT

//! Embedded-address CRUD for the authenticated user.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Address, User};
use crate::AppState;
use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The four address fields. Add and update share overwrite semantics: the
/// stored address becomes exactly this value, with no merge against the
/// previous one. An omitted field is stored as absent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressPayload {
    city: Option<String>,
    country: Option<String>,
    phone: Option<String>,
    pin_code: Option<String>,
}

impl From<AddressPayload> for Address {
    fn from(payload: AddressPayload) -> Self {
        Address {
            city: payload.city,
            country: payload.country,
            phone: payload.phone,
            pin_code: payload.pin_code,
        }
    }
}

#[derive(Serialize)]
pub struct AddressMessage {
    pub message: String,
}

#[derive(Serialize)]
pub struct AddressResponse {
    pub address: Option<Address>,
}

async fn load_user(state: &AppState, auth: &AuthUser) -> Result<User> {
    state
        .db
        .get_user(&auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", auth.user_id)))
}

/// Set the caller's address (POST).
pub async fn add_address(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<AddressPayload>,
) -> Result<Json<AddressMessage>> {
    let mut user = load_user(&state, &auth).await?;
    user.set_address(payload.into());
    state.db.upsert_user(&user).await?;

    Ok(Json(AddressMessage {
        message: "Address added successfully".to_string(),
    }))
}

/// Overwrite the caller's address (PUT). Same semantics as add.
pub async fn update_address(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<AddressPayload>,
) -> Result<Json<AddressMessage>> {
    let mut user = load_user(&state, &auth).await?;
    user.set_address(payload.into());
    state.db.upsert_user(&user).await?;

    Ok(Json(AddressMessage {
        message: "Address updated successfully".to_string(),
    }))
}

/// Get the caller's address, if any.
pub async fn get_address(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<AddressResponse>> {
    let user = load_user(&state, &auth).await?;
    Ok(Json(AddressResponse {
        address: user.address,
    }))
}

/// Clear the caller's address entirely.
pub async fn delete_address(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<AddressMessage>> {
    let mut user = load_user(&state, &auth).await?;
    user.clear_address();
    state.db.upsert_user(&user).await?;

    Ok(Json(AddressMessage {
        message: "Address deleted successfully".to_string(),
    }))
}

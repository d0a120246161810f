// SPDX-License-Identifier: MIT

//! Car catalog routes: public listing plus admin management.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Car, PublicCar};
use crate::AppState;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;
use std::sync::Arc;

/// List the whole catalog (public).
pub async fn all_cars(State(state): State<Arc<AppState>>) -> Result<Json<Vec<PublicCar>>> {
    let cars = state.db.list_cars().await?;
    Ok(Json(cars.into_iter().map(PublicCar::from).collect()))
}

/// Get one car by id (public).
pub async fn car_detail(
    State(state): State<Arc<AppState>>,
    Path(car_id): Path<String>,
) -> Result<Json<PublicCar>> {
    let car = state
        .db
        .get_car(&car_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Car {} not found", car_id)))?;

    Ok(Json(car.into()))
}

#[derive(Serialize)]
pub struct AddCarResponse {
    pub message: String,
    pub car: PublicCar,
}

/// Add a car to the catalog (admin only). Multipart form with text fields
/// plus any number of `images` file parts.
pub async fn add_car(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<AddCarResponse>)> {
    if !auth.role.is_admin() {
        return Err(AppError::Forbidden);
    }

    let mut brand = None;
    let mut model = None;
    let mut year = None;
    let mut price = None;
    let mut description = None;
    let mut images: Vec<(String, Vec<u8>)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "brand" => brand = Some(text(field).await?),
            "model" => model = Some(text(field).await?),
            "year" => {
                year = Some(text(field).await?.parse::<u32>().map_err(|_| {
                    AppError::BadRequest("Year must be a number".to_string())
                })?)
            }
            "price" => {
                price = Some(text(field).await?.parse::<u64>().map_err(|_| {
                    AppError::BadRequest("Price must be a number".to_string())
                })?)
            }
            "description" => description = Some(text(field).await?),
            "images" => {
                let filename = field.file_name().unwrap_or("car.jpg").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid image upload: {}", e)))?;
                images.push((filename, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let (Some(brand), Some(model)) = (brand, model) else {
        return Err(AppError::MissingField);
    };

    let mut car_images = Vec::with_capacity(images.len());
    for (filename, bytes) in images {
        car_images.push(state.media.upload_car_image(&filename, bytes).await?);
    }

    let car = Car {
        id: uuid::Uuid::new_v4().to_string(),
        brand,
        model,
        year,
        price,
        description,
        car_images,
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    state.db.upsert_car(&car).await?;

    tracing::info!(car_id = %car.id, brand = %car.brand, "Car added to catalog");

    Ok((
        StatusCode::CREATED,
        Json(AddCarResponse {
            message: "Car added successfully".to_string(),
            car: car.into(),
        }),
    ))
}

async fn text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid form field: {}", e)))
}

#[derive(Serialize)]
pub struct DeleteCarResponse {
    pub message: String,
}

/// Remove a car from the catalog (admin only), along with its stored images.
pub async fn delete_car(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(car_id): Path<String>,
) -> Result<Json<DeleteCarResponse>> {
    if !auth.role.is_admin() {
        return Err(AppError::Forbidden);
    }

    let car = state
        .db
        .get_car(&car_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Car {} not found", car_id)))?;

    state.db.delete_car(&car.id).await?;

    for image_url in &car.car_images {
        if let Err(e) = state.media.destroy(image_url).await {
            tracing::warn!(car_id = %car.id, error = %e, "Failed to delete car image");
        }
    }

    tracing::info!(car_id = %car.id, "Car removed from catalog");

    Ok(Json(DeleteCarResponse {
        message: "Car deleted successfully".to_string(),
    }))
}

//! Car listing model.

use serde::{Deserialize, Serialize};

/// Car listing stored in Firestore (document ID = `id`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: Option<u32>,
    /// Asking price in whole currency units
    pub price: Option<u64>,
    pub description: Option<String>,
    /// Image URLs in the image store
    pub car_images: Vec<String>,
    pub created_at: String,
}

/// Car shape returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicCar {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: Option<u32>,
    pub price: Option<u64>,
    pub description: Option<String>,
    pub car_images: Vec<String>,
}

impl From<Car> for PublicCar {
    fn from(car: Car) -> Self {
        Self {
            id: car.id,
            brand: car.brand,
            model: car.model,
            year: car.year,
            price: car.price,
            description: car.description,
            car_images: car.car_images,
        }
    }
}

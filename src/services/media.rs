// SPDX-License-Identifier: MIT

//! Image storage client (Cloudinary-style upload/destroy API).

use crate::error::AppError;
use serde::Deserialize;

/// Folder for user profile pictures.
const PROFILE_FOLDER: &str = "profile_images";
/// Folder for car listing photos.
const CAR_FOLDER: &str = "car_images";

/// Image storage client.
#[derive(Clone)]
pub struct MediaClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl MediaClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Upload a profile image, returning its public URL.
    pub async fn upload_profile_image(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<String, AppError> {
        self.upload(PROFILE_FOLDER, filename, bytes).await
    }

    /// Upload a car listing image, returning its public URL.
    pub async fn upload_car_image(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<String, AppError> {
        self.upload(CAR_FOLDER, filename, bytes).await
    }

    async fn upload(
        &self,
        folder: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<String, AppError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new()
            .text("folder", folder.to_string())
            .part("file", part);

        let response = self
            .http
            .post(format!("{}/upload", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::ExternalService("media", e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(
                "media",
                format!("upload returned {}", response.status()),
            ));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService("media", e.to_string()))?;

        tracing::debug!(folder, url = %body.secure_url, "Image uploaded");
        Ok(body.secure_url)
    }

    /// Delete a stored image by its public URL.
    ///
    /// Used when a profile image is replaced and on account deletion.
    pub async fn destroy(&self, image_url: &str) -> Result<(), AppError> {
        let public_id = public_id_from_url(image_url).ok_or_else(|| {
            AppError::ExternalService("media", format!("unrecognized image URL: {}", image_url))
        })?;

        let response = self
            .http
            .post(format!("{}/destroy", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "public_id": public_id }))
            .send()
            .await
            .map_err(|e| AppError::ExternalService("media", e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(
                "media",
                format!("destroy returned {}", response.status()),
            ));
        }

        tracing::debug!(public_id, "Image destroyed");
        Ok(())
    }
}

/// Extract the store's public id (folder/name without extension) from an
/// image URL, e.g. ".../profile_images/abc123.png" -> "profile_images/abc123".
fn public_id_from_url(url: &str) -> Option<String> {
    let mut segments = url.rsplit('/');
    let file = segments.next()?;
    let folder = segments.next()?;
    if file.is_empty() || folder.is_empty() {
        return None;
    }

    let name = file.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(file);
    Some(format!("{}/{}", folder, name))
}

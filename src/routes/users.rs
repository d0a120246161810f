// SPDX-License-Identifier: MIT

//! Account routes: signup, email verification, login, profile CRUD.

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, AuthUser, TOKEN_COOKIE};
use crate::models::{PublicUser, Role, User, UserPatch};
use crate::password::{hash_password, verify_password};
use crate::AppState;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// Generate a uniformly random 6-digit verification code.
fn generate_verification_code() -> u32 {
    rand::rng().random_range(100_000..=999_999)
}

// ─── Signup ──────────────────────────────────────────────────

#[derive(Debug, Validate)]
struct SignupForm {
    #[validate(email)]
    email: String,
    username: String,
    password: String,
    role: Role,
    image: Option<(String, Vec<u8>)>,
}

/// Parse the signup multipart form. Any absent required field is a
/// `MissingField`; a malformed email is a `BadRequest`.
async fn parse_signup_form(mut multipart: Multipart) -> Result<SignupForm> {
    let mut email = None;
    let mut username = None;
    let mut password = None;
    let mut role = None;
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "email" => email = Some(read_text(field).await?),
            "username" => username = Some(read_text(field).await?),
            "password" => password = Some(read_text(field).await?),
            "role" => role = Some(read_text(field).await?),
            "image" => {
                let filename = field
                    .file_name()
                    .unwrap_or("profile.jpg")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid image upload: {}", e)))?;
                image = Some((filename, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let (Some(email), Some(username), Some(password), Some(role)) =
        (email, username, password, role)
    else {
        return Err(AppError::MissingField);
    };
    if email.is_empty() || username.is_empty() || password.is_empty() || role.is_empty() {
        return Err(AppError::MissingField);
    }

    let role: Role = role
        .parse()
        .map_err(|_| AppError::BadRequest("Role must be 'user' or 'admin'".to_string()))?;

    let form = SignupForm {
        email,
        username,
        password,
        role,
        image,
    };
    form.validate()
        .map_err(|_| AppError::BadRequest("Invalid email address".to_string()))?;

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid form field: {}", e)))
}

#[derive(Serialize)]
pub struct SignupResponse {
    pub message: String,
    pub user: PublicUser,
    pub role: Role,
}

/// Create an account: hash the password, email a 6-digit code, and persist
/// the user unverified. If the email cannot be delivered, nothing is
/// persisted and nothing reaches the image store.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<SignupResponse>)> {
    let form = parse_signup_form(multipart).await?;

    if state.db.find_user_by_email(&form.email).await?.is_some() {
        return Err(AppError::BadRequest("Email is already registered".to_string()));
    }
    if state
        .db
        .find_user_by_username(&form.username)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest("Username is already taken".to_string()));
    }

    let password_hash = hash_password(&form.password)?;
    let code = generate_verification_code();

    // Delivery failure aborts the signup before anything is stored or
    // uploaded; the image goes to the store only once the email is out.
    state
        .mailer
        .send_verification_code(&form.email, code)
        .await?;

    let profile_image = match form.image {
        Some((filename, bytes)) => Some(state.media.upload_profile_image(&filename, bytes).await?),
        None => None,
    };

    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        username: form.username,
        email: form.email,
        password: password_hash,
        role: form.role,
        is_verified: false,
        code: Some(code),
        profile_image,
        address: None,
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    state.db.upsert_user(&user).await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User created, awaiting verification");

    let role = user.role;
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully".to_string(),
            user: user.into(),
            role,
        }),
    ))
}

// ─── Email Verification ──────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum CodeValue {
    Num(u32),
    Text(String),
}

#[derive(Deserialize)]
pub struct VerifyRequest {
    code: Option<CodeValue>,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub message: String,
    pub username: String,
}

/// Confirm the emailed code and mark the account verified.
///
/// The lookup is an exact (username, code) match; re-confirming an already
/// verified account with the same code succeeds without further effect.
pub async fn verify(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>> {
    let code = match req.code {
        Some(CodeValue::Num(n)) => n,
        Some(CodeValue::Text(s)) => s.trim().parse().map_err(|_| AppError::InvalidCode)?,
        None => return Err(AppError::MissingField),
    };

    let mut user = state
        .db
        .find_user_by_username_and_code(&username, code)
        .await?
        .ok_or(AppError::InvalidCode)?;

    if !user.is_verified {
        user.is_verified = true;
        state.db.upsert_user(&user).await?;
        tracing::info!(user_id = %user.id, "User verified");
    }

    Ok(Json(VerifyResponse {
        message: "User verified successfully".to_string(),
        username: user.username,
    }))
}

// ─── Login ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
    captcha: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub role: Role,
    pub user_id: String,
    pub username: String,
}

/// Log in: captcha check, verified-account lookup, password check, then a
/// fresh session token (response body plus http-only cookie).
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let (Some(email), Some(password), Some(captcha)) = (req.email, req.password, req.captcha)
    else {
        return Err(AppError::MissingField);
    };
    if email.is_empty() || password.is_empty() || captcha.is_empty() {
        return Err(AppError::MissingField);
    }

    if !state.captcha.verify(&captcha).await? {
        return Err(AppError::CaptchaFailed);
    }

    let user = state
        .db
        .find_verified_user_by_email(&email)
        .await?
        .ok_or(AppError::UnknownAccount)?;

    if !verify_password(&password, &user.password)? {
        return Err(AppError::BadCredential);
    }

    let token = create_jwt(&user, &state.config.jwt_signing_key, state.config.token_ttl_secs)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token creation failed: {}", e)))?;

    tracing::info!(user_id = %user.id, "User logged in");

    let cookie = Cookie::build((TOKEN_COOKIE, token.clone()))
        .http_only(true)
        .path("/")
        .build();

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            message: "You are logged in successfully".to_string(),
            token,
            role: user.role,
            user_id: user.id,
            username: user.username,
        }),
    ))
}

// ─── Profile ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ProfileResponse {
    pub user: PublicUser,
    pub admin: bool,
}

/// Get the caller's own profile.
pub async fn profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>> {
    let user = state
        .db
        .get_user(&auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", auth.user_id)))?;

    let admin = user.role.is_admin();
    Ok(Json(ProfileResponse {
        user: user.into(),
        admin,
    }))
}

// ─── Profile Update ──────────────────────────────────────────

#[derive(Serialize)]
pub struct UpdateResponse {
    pub message: String,
    pub newuser: PublicUser,
    pub admin: bool,
}

/// Update the caller's profile. Only provided multipart fields change; a
/// password change requires the old password; a new image replaces (and
/// deletes) the previously stored one.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<Json<UpdateResponse>> {
    let mut patch = UserPatch::default();
    let mut old_password = None;
    let mut new_password = None;
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "username" => patch.username = Some(read_text(field).await?),
            "email" => patch.email = Some(read_text(field).await?),
            "role" => {
                let raw = read_text(field).await?;
                patch.role = Some(raw.parse().map_err(|_| {
                    AppError::BadRequest("Role must be 'user' or 'admin'".to_string())
                })?);
            }
            "oldpassword" => old_password = Some(read_text(field).await?),
            "newpassword" => new_password = Some(read_text(field).await?),
            "image" => {
                let filename = field.file_name().unwrap_or("profile.jpg").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid image upload: {}", e)))?;
                image = Some((filename, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let mut user = state
        .db
        .get_user(&auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", auth.user_id)))?;

    if let Some(new_password) = new_password {
        let old_password = old_password.ok_or(AppError::MissingField)?;
        if !verify_password(&old_password, &user.password)? {
            return Err(AppError::BadRequest("Old password does not match".to_string()));
        }
        patch.password_hash = Some(hash_password(&new_password)?);
    }

    if let Some((filename, bytes)) = image {
        // Replacement removes the previous image from the store first.
        if let Some(old_url) = &user.profile_image {
            state.media.destroy(old_url).await?;
        }
        patch.profile_image = Some(state.media.upload_profile_image(&filename, bytes).await?);
    }

    user.apply_patch(patch);
    state.db.upsert_user(&user).await?;

    tracing::info!(user_id = %user.id, "User updated");

    let admin = user.role.is_admin();
    Ok(Json(UpdateResponse {
        message: "User updated successfully".to_string(),
        newuser: user.into(),
        admin,
    }))
}

// ─── Account Deletion ────────────────────────────────────────

#[derive(Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub user: PublicUser,
}

/// Delete the caller's account and its stored profile image.
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<DeleteResponse>> {
    let user = state
        .db
        .get_user(&auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", auth.user_id)))?;

    state.db.delete_user(&user.id).await?;

    // Image cleanup is best effort; the account is already gone.
    if let Some(image_url) = &user.profile_image {
        if let Err(e) = state.media.destroy(image_url).await {
            tracing::warn!(user_id = %user.id, error = %e, "Failed to delete profile image");
        }
    }

    tracing::info!(user_id = %user.id, "Account deleted");

    Ok(Json(DeleteResponse {
        message: "User deleted successfully".to_string(),
        user: user.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_code_range() {
        for _ in 0..1000 {
            let code = generate_verification_code();
            assert!((100_000..=999_999).contains(&code), "out of range: {}", code);
        }
    }
}

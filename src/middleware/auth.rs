// SPDX-License-Identifier: MIT

//! JWT session tokens and the authentication middleware.

use crate::models::{Role, User};
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Cookie carrying the session token (also accepted as a bearer header).
pub const TOKEN_COOKIE: &str = "Token";

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user document ID)
    pub sub: String,
    pub username: String,
    pub role: Role,
    pub profile_image: Option<String>,
    /// Issued at (Unix timestamp)
    pub iat: usize,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
}

/// Authenticated user extracted from JWT.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub username: String,
    pub role: Role,
}

/// Middleware that requires valid JWT authentication.
///
/// Handlers behind this layer act only on `AuthUser.user_id`; a
/// client-supplied id is never trusted.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // Try cookie first, then header
    let token = if let Some(cookie) = jar.get(TOKEN_COOKIE) {
        cookie.value().to_string()
    } else {
        let auth_header = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match auth_header {
            Some(h) if h.starts_with("Bearer ") => h[7..].to_string(),
            _ => return Err(StatusCode::UNAUTHORIZED),
        }
    };

    let claims = decode_jwt(&token, &state.config.jwt_signing_key)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let auth_user = AuthUser {
        user_id: claims.sub,
        username: claims.username,
        role: claims.role,
    };
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Create a JWT for a user session.
///
/// Deterministic given identical inputs and timestamp; the TTL comes from
/// configuration, one process-wide policy for every issued token.
pub fn create_jwt(user: &User, signing_key: &[u8], ttl_secs: u64) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: user.id.clone(),
        username: user.username.clone(),
        role: user.role,
        profile_image: user.profile_image.clone(),
        iat: now,
        exp: now + ttl_secs as usize,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

/// Verify a JWT and return its claims.
///
/// Fails when the signature does not match the key, the token is malformed,
/// or the expiry has elapsed.
pub fn decode_jwt(token: &str, signing_key: &[u8]) -> Result<Claims, crate::error::AppError> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|_| crate::error::AppError::InvalidToken)
}

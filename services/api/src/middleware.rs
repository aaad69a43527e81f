//! Authentication middleware for session cookie validation
//!
//! Every cart and order operation resolves the caller's identity the same
//! way: a missing cookie, an invalid or expired token, or a token whose
//! subject no longer maps to an existing user all fail with a uniform 401,
//! before any cart or order persistence runs.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::error;
use uuid::Uuid;

use crate::{auth::AUTH_COOKIE_NAME, error::ApiError, models::user::User, state::AppState};

/// Identity resolved from a valid session cookie
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

/// Authentication middleware
///
/// Validates the session cookie and inserts the resolved [`AuthUser`] into
/// the request extensions for the protected handlers.
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = jar
        .get(AUTH_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .ok_or(ApiError::Unauthorized)?;

    let claims = state
        .auth_service
        .verify_token(&token)
        .map_err(|_| ApiError::Unauthorized)?;

    req.extensions_mut().insert(AuthUser {
        id: claims.sub,
        email: claims.email,
    });

    Ok(next.run(req).await)
}

/// Load the full user record behind a resolved identity
///
/// A token whose subject was deleted since issuance fails exactly like a
/// missing token.
pub async fn current_user(state: &AppState, auth: &AuthUser) -> Result<User, ApiError> {
    state
        .user_repository
        .find_by_id(auth.id)
        .await
        .map_err(|e| {
            error!("Failed to load user {}: {}", auth.id, e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::Unauthorized)
}

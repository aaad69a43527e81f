//! Authentication routes: signup, signin, logout, and the current-user
//! profile

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::{
    error::ApiError,
    extract::Payload,
    middleware::{AuthUser, current_user},
    models::user::UserProfile,
    repositories::user::NewUser,
    state::AppState,
    validation::{validate_email, validate_password},
};

/// Request for account creation
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Request for sign-in
#[derive(Deserialize)]
pub struct SigninRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Register a new user account
pub async fn signup(
    State(state): State<AppState>,
    Payload(payload): Payload<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = payload
        .email
        .as_deref()
        .map(|e| e.trim().to_lowercase())
        .unwrap_or_default();
    let password = payload
        .password
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();

    if email.is_empty() || password.is_empty() {
        return Err(ApiError::InvalidPayload(
            "Email and password are required.".to_string(),
        ));
    }

    validate_email(&email).map_err(ApiError::InvalidPayload)?;
    validate_password(password).map_err(ApiError::Validation)?;

    let existing = state.user_repository.find_by_email(&email).await.map_err(|e| {
        error!("Failed to look up email: {}", e);
        ApiError::InternalServerError
    })?;
    if existing.is_some() {
        return Err(ApiError::Conflict(
            "An account with this email already exists.".to_string(),
        ));
    }

    let new_user = NewUser {
        email,
        password: password.to_string(),
        first_name: trimmed(payload.first_name),
        last_name: trimmed(payload.last_name),
    };

    let user = state.user_repository.create(&new_user).await.map_err(|e| {
        error!("Failed to create user: {}", e);
        ApiError::InternalServerError
    })?;

    info!("Created account for user {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Account created successfully.",
            "user": UserProfile::from(&user),
        })),
    ))
}

/// Verify credentials and start a session
pub async fn signin(
    State(state): State<AppState>,
    jar: CookieJar,
    Payload(payload): Payload<SigninRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = payload
        .email
        .as_deref()
        .map(|e| e.trim().to_lowercase())
        .unwrap_or_default();
    let password = payload
        .password
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();

    if email.is_empty() || password.is_empty() {
        return Err(ApiError::InvalidPayload(
            "Email and password are required.".to_string(),
        ));
    }

    let user = state
        .user_repository
        .find_by_email(&email)
        .await
        .map_err(|e| {
            error!("Failed to look up email: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::InvalidCredentials)?;

    let is_match = state
        .user_repository
        .verify_password(&user, password)
        .await
        .map_err(|e| {
            error!("Failed to verify password: {}", e);
            ApiError::InternalServerError
        })?;
    if !is_match {
        return Err(ApiError::InvalidCredentials);
    }

    let token = state
        .auth_service
        .issue_token(user.id, &user.email)
        .map_err(|e| {
            error!("Failed to issue session token: {}", e);
            ApiError::InternalServerError
        })?;

    info!("User {} signed in", user.id);

    let jar = jar.add(state.auth_service.session_cookie(token));

    Ok((
        jar,
        Json(json!({
            "message": "Signed in successfully.",
            "user": UserProfile::from(&user),
            "expiresIn": state.auth_service.token_ttl(),
        })),
    ))
}

/// Clear the session cookie to sign the user out
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = jar.add(state.auth_service.removal_cookie());

    (jar, Json(json!({ "message": "Signed out successfully." })))
}

/// Return the current authenticated user's profile
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let user = current_user(&state, &auth).await?;

    Ok(Json(UserProfile::from(&user)))
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

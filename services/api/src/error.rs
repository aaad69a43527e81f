//! Custom error types for the storefront service
//!
//! Validation failures are converted to structured responses at the
//! boundary; authorization failures short-circuit with a uniform 401; and
//! unexpected failures surface as a generic 500 with the detail logged
//! server-side only.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the storefront service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing, invalid, or expired session, or a session whose subject no
    /// longer exists
    #[error("Not authenticated")]
    Unauthorized,

    /// Sign-in with an unknown email or a wrong password
    #[error("Invalid email or password.")]
    InvalidCredentials,

    /// Missing or malformed required fields in a request payload
    #[error("{0}")]
    InvalidPayload(String),

    /// Well-formed payload rejected by a validation rule
    #[error("{0}")]
    Validation(String),

    /// Operating on a cart item id that is not in the cart
    #[error("{0}")]
    NotFound(String),

    /// Signup with an email that already has an account
    #[error("{0}")]
    Conflict(String),

    /// Checkout with nothing to order
    #[error("Your cart is empty.")]
    EmptyCart,

    /// Unknown `type` value on a catalog query
    #[error("Invalid product type")]
    InvalidProductType,

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::InvalidPayload(_) | ApiError::EmptyCart | ApiError::InvalidProductType => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalServerError | ApiError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Never leak internal detail to the caller.
        let error_message = match &self {
            ApiError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_the_error_taxonomy() {
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::InvalidPayload("Invalid cart item payload.".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Validation("Password must be at least 8 characters long.".to_string())
                .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::NotFound("Item not found in cart.".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("An account with this email already exists.".to_string()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(ApiError::EmptyCart.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidProductType.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InternalServerError.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unauthorized_response_carries_a_uniform_body() {
        let response = ApiError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn internal_error_message_is_generic() {
        assert_eq!(
            ApiError::InternalServerError.to_string(),
            "Internal server error"
        );
    }
}

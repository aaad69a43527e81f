//! Request extractors for the storefront service
//!
//! Axum's stock `Json` rejection answers malformed bodies with a plain-text
//! 422. Every handler here speaks the `{"error": ...}` shape instead, so the
//! JSON extractor is wrapped to fail with [`ApiError::InvalidPayload`].

use axum::{
    Json, async_trait,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON request body that rejects with the service's own error shape
#[derive(Debug)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|_| ApiError::InvalidPayload("Invalid request body.".to_string()))?;

        Ok(Payload(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{StatusCode, header};
    use axum::response::IntoResponse;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct QuantityBody {
        quantity: i64,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("build request")
    }

    #[tokio::test]
    async fn well_formed_bodies_deserialize() {
        let req = json_request(r#"{"quantity": 3}"#);

        let Payload(body) = Payload::<QuantityBody>::from_request(req, &())
            .await
            .expect("extract payload");
        assert_eq!(body.quantity, 3);
    }

    #[tokio::test]
    async fn type_mismatched_bodies_fail_as_invalid_payload() {
        let req = json_request(r#"{"quantity": 1.5}"#);

        let err = Payload::<QuantityBody>::from_request(req, &())
            .await
            .expect_err("should reject");
        assert!(matches!(err, ApiError::InvalidPayload(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_json_bodies_fail_as_invalid_payload() {
        let req = Request::builder()
            .method("POST")
            .body(Body::from("quantity=3"))
            .expect("build request");

        let err = Payload::<QuantityBody>::from_request(req, &())
            .await
            .expect_err("should reject");
        assert!(matches!(err, ApiError::InvalidPayload(_)));
    }
}

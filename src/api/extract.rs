//! Request extractors

use axum::{
    Json, async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON body extractor whose rejection is an `AppError`
///
/// Malformed bodies answer with the usual `{"error": ...}` shape and a
/// 400 status instead of axum's plain-text rejection. Bodies over the
/// router's `DefaultBodyLimit` keep their 413 in the same shape.
///
/// # Usage
/// ```ignore
/// async fn handler(JsonBody(draft): JsonBody<RestaurantDraft>) -> ... {}
/// ```
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(request, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Err(AppError::PayloadTooLarge(rejection.body_text()))
            }
            Err(rejection) => Err(AppError::Validation(rejection.body_text())),
        }
    }
}

/// Parse a restaurant id path segment
pub fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::Validation(format!("invalid restaurant id: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
    }

    #[test]
    fn parse_id_rejects_garbage() {
        assert!(matches!(parse_id("abc"), Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn oversized_body_is_json_error() {
        use axum::{
            Router,
            body::{Body, to_bytes},
            extract::DefaultBodyLimit,
            http::header,
            routing::post,
        };
        use tower::ServiceExt;

        async fn accept(JsonBody(value): JsonBody<serde_json::Value>) -> String {
            value.to_string()
        }

        let app = Router::new()
            .route("/", post(accept))
            .layer(DefaultBodyLimit::max(16));
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name": "well past sixteen bytes"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn malformed_body_is_validation_error() {
        use axum::{body::Body, http::header};

        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let result = JsonBody::<serde_json::Value>::from_request(request, &()).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}

//! Error types for Restodir
//!
//! All errors in the application are converted to `AppError`,
//! which implements `IntoResponse` for proper HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Application-wide error type
///
/// A closed set of failure kinds. Each variant maps to one HTTP status
/// and one `error_type` label on the error counter.
#[derive(Debug, Error)]
pub enum AppError {
    /// Referenced record does not exist (404)
    #[error("Not found")]
    NotFound,

    /// A draft or request body failed validation (400)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Request body exceeds the accepted size (413)
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// No persistent storage is configured or reachable (500)
    #[error("No database")]
    StorageUnavailable,

    /// The store rejected a well-formed operation (500)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error (500)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error (500)
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Internal(anyhow::anyhow!("Migration failed: {}", err))
    }
}

impl AppError {
    /// HTTP status and metric label for this error
    pub fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation"),
            AppError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"),
            AppError::StorageUnavailable => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_unavailable")
            }
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database"),
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }
}

impl IntoResponse for AppError {
    /// Convert error to HTTP response
    ///
    /// The body is always `{"error": "..."}`. Storage failures keep their
    /// underlying cause in the message so callers can diagnose them.
    fn into_response(self) -> Response {
        use axum::Json;

        let (status, error_type) = self.classify();
        let error_message = match &self {
            AppError::Validation(msg) | AppError::PayloadTooLarge(msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, error_type, "Request failed");
        } else {
            tracing::debug!(error = %self, error_type, "Request rejected");
        }

        use crate::metrics::ERRORS_TOTAL;
        ERRORS_TOTAL.with_label_values(&[error_type]).inc();

        let body = Json(serde_json::json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_are_distinct_per_kind() {
        assert_eq!(AppError::NotFound.classify().0, StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Validation("name is required".to_string()).classify().0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::PayloadTooLarge("too big".to_string()).classify().0,
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            AppError::StorageUnavailable.classify().0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Database(sqlx::Error::PoolTimedOut).classify().1,
            "database"
        );
    }

    #[test]
    fn storage_failure_message_keeps_cause() {
        let error = AppError::Database(sqlx::Error::PoolTimedOut);
        assert!(error.to_string().starts_with("Database error:"));
        assert!(error.to_string().len() > "Database error: ".len());
    }

    #[tokio::test]
    async fn validation_error_renders_error_body() {
        let response = AppError::Validation("name is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "name is required");
    }
}

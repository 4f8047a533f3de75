//! API layer
//!
//! HTTP handlers for:
//! - Restaurant CRUD, bulk insert and sync
//! - Health check
//! - Metrics (Prometheus)

mod dto;
mod extract;
mod health;
pub mod metrics;
mod restaurants;

pub use dto::*;
pub use extract::JsonBody;

pub use health::health_router;
pub use metrics::{metrics_router, track_http_metrics};
pub use restaurants::restaurants_router;

use axum::Router;

use crate::AppState;
use crate::error::AppError;

/// Everything served under `/api`
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(restaurants_router())
        .merge(health_router())
}

/// Fallback for unknown routes
pub async fn not_found() -> AppError {
    AppError::NotFound
}

//! Health endpoint

use axum::{Router, extract::State, response::Json, routing::get};

use super::dto::HealthResponse;
use crate::AppState;

/// Create health router
///
/// Routes:
/// - GET /health - Liveness plus storage availability
pub fn health_router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET /health
///
/// Always 200 while the process serves requests; `database` tells
/// whether persistent storage answers right now.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        database: state.storage.is_available().await,
    })
}

//! Restodir - a small restaurant directory backend
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      API Layer (Axum)                        │
//! │  - /api/restaurants CRUD and bulk insert                    │
//! │  - /api/sync replace-style client sync                      │
//! │  - /api/health, /metrics                                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Service Layer                            │
//! │  - Draft validation and defaults                            │
//! │  - Replace-everything sync                                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Data Layer                              │
//! │  - SQLite (sqlx) connection pool                            │
//! │  - Optional: the server runs without storage                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Map placement (`placement`) sits beside these layers: it is pure and
//! never touches storage.
//!
//! # Modules
//!
//! - `api`: HTTP handlers
//! - `service`: Business logic layer
//! - `data`: Database layer
//! - `placement`: Deterministic pseudo-coordinates for map rendering
//! - `config`: Configuration management
//! - `error`: Error types
//! - `metrics`: Prometheus instruments

pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod placement;
pub mod service;

use std::sync::Arc;

/// Largest accepted request body; sync payloads carry the whole dataset.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Application state shared across all handlers
///
/// This struct is cloned for each request and contains
/// shared resources like the database pool and services.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<config::AppConfig>,

    /// Persistent storage (may be unavailable)
    pub storage: data::Storage,

    /// Record lifecycle
    pub restaurants: service::RestaurantService,

    /// Replace-style sync
    pub sync: service::SyncService,
}

impl AppState {
    /// Initialize application state
    ///
    /// # Steps
    /// 1. Connect to the SQLite database (if configured)
    /// 2. Ensure the schema exists
    /// 3. Build services over the storage handle
    ///
    /// Storage problems are logged, not returned: the server starts
    /// either way and reports availability through `/api/health`.
    pub async fn new(config: config::AppConfig) -> Self {
        tracing::info!("Initializing application state...");

        let storage = data::Storage::open(&config.database).await;
        if storage.is_configured() {
            tracing::info!("Persistent storage ready");
        }

        Self::with_storage(config, storage)
    }

    /// Build state over an already prepared storage handle
    pub fn with_storage(config: config::AppConfig, storage: data::Storage) -> Self {
        Self {
            config: Arc::new(config),
            restaurants: service::RestaurantService::new(storage.clone()),
            sync: service::SyncService::new(storage.clone()),
            storage,
        }
    }
}

/// Build the Axum router with all routes.
///
/// This is shared by the binary and integration tests to keep route
/// composition consistent across environments.
pub fn build_router(state: AppState) -> axum::Router {
    use axum::Router;
    use axum::extract::DefaultBodyLimit;
    use axum::http::{HeaderValue, header};
    use tower_http::{
        compression::CompressionLayer, cors::CorsLayer, set_header::SetResponseHeaderLayer,
        trace::TraceLayer,
    };

    Router::new()
        .nest("/api", api::api_router())
        .merge(api::metrics_router())
        .fallback(api::not_found)
        .layer(axum::middleware::from_fn(api::track_http_metrics))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

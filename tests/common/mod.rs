//! Common test utilities for E2E tests

#![allow(dead_code)]

use restodir::{AppState, config};
use serde_json::Value;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance
pub struct TestServer {
    pub addr: String,
    pub state: AppState,
    pub _temp_dir: TempDir,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Create a new test server backed by a fresh SQLite file
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        Self::start(Some(db_path), temp_dir).await
    }

    /// Create a test server with no database configured
    pub async fn without_storage() -> Self {
        let temp_dir = TempDir::new().unwrap();
        Self::start(None, temp_dir).await
    }

    async fn start(db_path: Option<std::path::PathBuf>, temp_dir: TempDir) -> Self {
        let config = config::AppConfig {
            server: config::ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Let OS assign port
            },
            database: config::DatabaseConfig {
                path: db_path,
                ..config::DatabaseConfig::default()
            },
            logging: config::LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        };

        restodir::metrics::init_metrics();

        // Initialize app state
        let state = AppState::new(config).await;

        // Create HTTP client
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap();

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let addr_str = format!("http://{}", addr);

        let app = restodir::build_router(state.clone());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr: addr_str,
            state,
            _temp_dir: temp_dir,
            client,
        }
    }

    /// Get base URL for API requests
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }

    /// POST a restaurant and return the created record
    pub async fn create_restaurant(&self, body: Value) -> Value {
        let response = self
            .client
            .post(self.url("/api/restaurants"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);
        let body: Value = response.json().await.unwrap();
        body["data"].clone()
    }

    /// GET the full listing
    pub async fn list_restaurants(&self) -> Vec<Value> {
        let response = self
            .client
            .get(self.url("/api/restaurants"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        body["data"].as_array().cloned().unwrap_or_default()
    }
}

//! Storage availability
//!
//! The server keeps running without a database. `Storage` is the handle
//! every service holds; it either wraps a connected [`Database`] or
//! reports that none is available.

use std::sync::Arc;

use super::database::Database;
use crate::config::DatabaseConfig;
use crate::error::AppError;

/// Optional persistent storage
#[derive(Clone, Default)]
pub struct Storage {
    db: Option<Arc<Database>>,
}

impl Storage {
    /// Storage backed by a connected database
    pub fn new(db: Database) -> Self {
        Self {
            db: Some(Arc::new(db)),
        }
    }

    /// Storage that reports itself unavailable
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Connect and prepare the schema described by `config`
    ///
    /// Never fails: a missing path or a database that cannot be opened is
    /// logged and yields unavailable storage.
    pub async fn open(config: &DatabaseConfig) -> Self {
        if config.path.is_none() {
            tracing::warn!("No database.path configured; running without persistent storage");
            return Self::unavailable();
        }

        let db = match Database::connect(config).await {
            Ok(db) => db,
            Err(error) => {
                tracing::error!(%error, "Database connection failed; running without persistent storage");
                return Self::unavailable();
            }
        };

        if let Err(error) = db.ensure_schema().await {
            tracing::error!(%error, "Database schema setup failed; running without persistent storage");
            db.close().await;
            return Self::unavailable();
        }

        Self::new(db)
    }

    /// Whether a database was connected at startup
    pub fn is_configured(&self) -> bool {
        self.db.is_some()
    }

    /// Whether storage is configured and currently answers queries
    pub async fn is_available(&self) -> bool {
        match &self.db {
            Some(db) => db.ping().await,
            None => false,
        }
    }

    /// The connected database
    ///
    /// # Errors
    /// Returns `AppError::StorageUnavailable` if none is configured
    pub fn database(&self) -> Result<&Database, AppError> {
        self.db.as_deref().ok_or(AppError::StorageUnavailable)
    }
}

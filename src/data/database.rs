//! SQLite database operations
//!
//! All database access goes through this module. Every query runs on a
//! connection obtained from [`Database::with_connection`] or
//! [`Database::with_transaction`], so the pooled connection is handed back
//! on every exit path, including errors.

use std::time::Duration;

use futures::future::BoxFuture;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use super::models::*;
use crate::config::DatabaseConfig;
use crate::error::AppError;
use crate::metrics::{DB_CONNECTIONS_ACTIVE, DB_QUERIES_TOTAL};

const RESTAURANT_COLUMNS: &str = r#"id, zone, name, address, "type", phone, created_at"#;

/// Database connection pool wrapper.
pub struct Database {
    pool: Pool<Sqlite>,
}

/// Keeps the active-connection gauge honest on every exit path.
struct ActiveConnection;

impl ActiveConnection {
    fn enter() -> Self {
        DB_CONNECTIONS_ACTIVE.inc();
        Self
    }
}

impl Drop for ActiveConnection {
    fn drop(&mut self) {
        DB_CONNECTIONS_ACTIVE.dec();
    }
}

/// Classify a failure to obtain a connection
///
/// A closed or exhausted pool and I/O errors while opening the file mean
/// the store cannot be reached. Anything else is a real database error.
fn acquire_error(error: sqlx::Error) -> AppError {
    match error {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            tracing::warn!(%error, "Database unreachable");
            AppError::StorageUnavailable
        }
        other => AppError::Database(other),
    }
}

impl Database {
    // =========================================================================
    // Connection
    // =========================================================================

    /// Connect to the SQLite database named by `config`
    ///
    /// Creates the database file (and its parent directory) if it doesn't
    /// exist. Does not touch the schema; call [`Database::ensure_schema`].
    ///
    /// # Errors
    /// Returns `AppError::StorageUnavailable` when no path is configured,
    /// `AppError::Database` when the file cannot be opened.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let path = config.path.as_ref().ok_or(AppError::StorageUnavailable)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| AppError::Database(sqlx::Error::Io(e)))?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect_with(options)
            .await?;

        tracing::info!(path = %path.display(), "Database connected");

        Ok(Self { pool })
    }

    /// Create the restaurants table if it does not exist yet
    ///
    /// Safe to run on every startup.
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Migration failed: {}", e);
                AppError::from(e)
            })?;

        tracing::info!("Database schema ready");
        Ok(())
    }

    /// Round-trip a trivial query; `false` on any failure
    pub async fn ping(&self) -> bool {
        let result = self
            .with_connection(|conn| {
                Box::pin(async move {
                    sqlx::query_scalar::<_, i64>("SELECT 1")
                        .fetch_one(&mut *conn)
                        .await
                        .map_err(AppError::from)
                })
            })
            .await;

        match result {
            Ok(_) => true,
            Err(error) => {
                tracing::warn!(%error, "Database ping failed");
                false
            }
        }
    }

    /// Run `f` on a single pooled connection
    ///
    /// The connection returns to the pool when this call finishes, whether
    /// `f` succeeded or failed. Failing to obtain a connection at all is
    /// reported as `AppError::StorageUnavailable`.
    pub async fn with_connection<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, Result<T, AppError>>,
    {
        let mut conn = self.pool.acquire().await.map_err(acquire_error)?;
        let _active = ActiveConnection::enter();
        f(&mut *conn).await
    }

    /// Run `f` inside a transaction
    ///
    /// Commits when `f` returns `Ok`. Any error rolls the whole sequence
    /// back, so other connections see either the old or the new state.
    /// Acquire failures map the same way as in [`Database::with_connection`].
    pub async fn with_transaction<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, Result<T, AppError>>,
    {
        let mut tx = self.pool.begin().await.map_err(acquire_error)?;
        let _active = ActiveConnection::enter();
        let value = f(&mut *tx).await?;
        tx.commit().await?;
        Ok(value)
    }

    /// Close the pool, waiting for checked-out connections to return
    pub async fn close(&self) {
        self.pool.close().await;
    }

    // =========================================================================
    // Restaurants
    // =========================================================================

    /// All restaurants ordered by zone, then name, then id
    ///
    /// Comparison uses SQLite's default BINARY collation, so ordering is
    /// case-sensitive.
    pub async fn list_restaurants(&self) -> Result<Vec<Restaurant>, AppError> {
        DB_QUERIES_TOTAL.with_label_values(&["list"]).inc();

        self.with_connection(|conn| {
            Box::pin(async move {
                let rows = sqlx::query_as::<_, Restaurant>(&format!(
                    "SELECT {RESTAURANT_COLUMNS} FROM restaurants ORDER BY zone, name, id"
                ))
                .fetch_all(&mut *conn)
                .await?;
                Ok(rows)
            })
        })
        .await
    }

    /// Get a restaurant by id
    pub async fn get_restaurant(&self, id: i64) -> Result<Option<Restaurant>, AppError> {
        DB_QUERIES_TOTAL.with_label_values(&["get"]).inc();

        self.with_connection(move |conn| {
            Box::pin(async move {
                let row = sqlx::query_as::<_, Restaurant>(&format!(
                    "SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE id = ?"
                ))
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;
                Ok(row)
            })
        })
        .await
    }

    /// Insert one restaurant and return the stored row
    pub async fn insert_restaurant(&self, new: NewRestaurant) -> Result<Restaurant, AppError> {
        DB_QUERIES_TOTAL.with_label_values(&["insert"]).inc();

        self.with_connection(move |conn| Box::pin(async move { insert_row(conn, &new).await }))
            .await
    }

    /// Overwrite every mutable column of an existing restaurant
    ///
    /// # Returns
    /// The updated row, or `None` if `id` does not exist
    pub async fn update_restaurant(
        &self,
        id: i64,
        new: NewRestaurant,
    ) -> Result<Option<Restaurant>, AppError> {
        DB_QUERIES_TOTAL.with_label_values(&["update"]).inc();

        self.with_connection(move |conn| {
            Box::pin(async move {
                let row = sqlx::query_as::<_, Restaurant>(&format!(
                    r#"
                    UPDATE restaurants
                    SET zone = ?, name = ?, address = ?, "type" = ?, phone = ?
                    WHERE id = ?
                    RETURNING {RESTAURANT_COLUMNS}
                    "#
                ))
                .bind(&new.zone)
                .bind(&new.name)
                .bind(&new.address)
                .bind(&new.kind)
                .bind(&new.phone)
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;
                Ok(row)
            })
        })
        .await
    }

    /// Delete a restaurant by id
    ///
    /// # Returns
    /// `true` if a row was removed
    pub async fn delete_restaurant(&self, id: i64) -> Result<bool, AppError> {
        DB_QUERIES_TOTAL.with_label_values(&["delete"]).inc();

        self.with_connection(move |conn| {
            Box::pin(async move {
                let result = sqlx::query("DELETE FROM restaurants WHERE id = ?")
                    .bind(id)
                    .execute(&mut *conn)
                    .await?;
                Ok(result.rows_affected() > 0)
            })
        })
        .await
    }

    /// Delete every restaurant
    ///
    /// # Returns
    /// Number of rows removed
    pub async fn delete_all_restaurants(&self) -> Result<u64, AppError> {
        DB_QUERIES_TOTAL.with_label_values(&["delete_all"]).inc();

        self.with_connection(|conn| Box::pin(async move { delete_all_rows(conn).await }))
            .await
    }

    /// Insert a batch in input order, optionally wiping the table first
    ///
    /// Runs as one transaction: if any statement fails, nothing from this
    /// call is kept (including the wipe).
    ///
    /// # Returns
    /// Number of rows inserted
    pub async fn insert_restaurants(
        &self,
        rows: Vec<NewRestaurant>,
        wipe_first: bool,
    ) -> Result<u64, AppError> {
        DB_QUERIES_TOTAL.with_label_values(&["insert_batch"]).inc();

        self.with_transaction(move |conn| {
            Box::pin(async move {
                if wipe_first {
                    let removed = delete_all_rows(conn).await?;
                    tracing::debug!(removed, "Cleared restaurants before batch insert");
                }

                let mut inserted = 0u64;
                for row in &rows {
                    insert_row(conn, row).await?;
                    inserted += 1;
                }
                Ok(inserted)
            })
        })
        .await
    }

    /// Number of stored restaurants
    pub async fn count_restaurants(&self) -> Result<i64, AppError> {
        DB_QUERIES_TOTAL.with_label_values(&["count"]).inc();

        self.with_connection(|conn| {
            Box::pin(async move {
                let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM restaurants")
                    .fetch_one(&mut *conn)
                    .await?;
                Ok(count)
            })
        })
        .await
    }
}

async fn insert_row(
    conn: &mut SqliteConnection,
    new: &NewRestaurant,
) -> Result<Restaurant, AppError> {
    let row = sqlx::query_as::<_, Restaurant>(&format!(
        r#"
        INSERT INTO restaurants (zone, name, address, "type", phone, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING {RESTAURANT_COLUMNS}
        "#
    ))
    .bind(&new.zone)
    .bind(&new.name)
    .bind(&new.address)
    .bind(&new.kind)
    .bind(&new.phone)
    .bind(chrono::Utc::now())
    .fetch_one(&mut *conn)
    .await?;

    Ok(row)
}

async fn delete_all_rows(conn: &mut SqliteConnection) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM restaurants")
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

//! Data layer module
//!
//! Handles all data persistence:
//! - SQLite connection pool and queries
//! - Storage availability
//! - Record models and drafts

mod database;
mod models;
mod storage;

pub use database::Database;
pub use models::*;
pub use storage::Storage;

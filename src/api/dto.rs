//! Request and response DTOs
//!
//! Successful responses wrap their payload in `data`; failures carry an
//! `error` string (see [`crate::error::AppError`]).

use serde::{Deserialize, Serialize};

use crate::data::{Restaurant, RestaurantDraft};

/// `{"data": ..., "message": ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: Some(message.into()),
        }
    }
}

/// Listing response
///
/// Without storage `data` is empty and `error` says why; the status is
/// still 200.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub data: Vec<Restaurant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Payload for batch operations
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CountData {
    pub count: u64,
}

/// Payload for single deletes
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeletedData {
    pub id: i64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: bool,
}

/// POST /api/restaurants/bulk body
#[derive(Debug, Clone, Deserialize)]
pub struct BulkCreateRequest {
    #[serde(default)]
    pub restaurants: Vec<RestaurantDraft>,
    /// Delete everything stored before inserting
    #[serde(default)]
    pub replace: bool,
}

/// POST /api/sync body
#[derive(Debug, Clone, Deserialize)]
pub struct SyncRequest {
    #[serde(default)]
    pub restaurants: Vec<RestaurantDraft>,
}

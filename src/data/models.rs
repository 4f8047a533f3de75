//! Data models
//!
//! Rust structs representing database entities and the drafts
//! callers submit before defaults and ids are resolved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Zone assigned when a draft does not name one
pub const DEFAULT_ZONE: &str = "1";

/// Category assigned when a draft does not name one
pub const DEFAULT_TYPE: &str = "Restaurant";

// =============================================================================
// Restaurant
// =============================================================================

/// A stored directory record
///
/// `zone`, `name` and `address` are never empty; `kind` and `phone`
/// are always resolved to a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: i64,
    pub zone: String,
    pub name: String,
    pub address: String,
    /// Free-text category ("Pizzerie", "Bistro", ...)
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Draft
// =============================================================================

/// Caller-supplied record fields
///
/// Every field is optional on the wire. Unknown keys are skipped, so a
/// client can post back records it previously received (or its own local
/// copies with any `id`/`createdAt` shape); storage always assigns fresh
/// values for both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl RestaurantDraft {
    /// Draft with only the two required fields set
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            address: Some(address.into()),
            ..Self::default()
        }
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Validate required fields and apply defaults
    ///
    /// `name` and `address` must be present and not blank. A missing or
    /// blank `zone` becomes [`DEFAULT_ZONE`]; a missing `type` becomes
    /// [`DEFAULT_TYPE`]; a missing `phone` becomes the empty string.
    ///
    /// # Errors
    /// Returns `AppError::Validation` naming the first missing field
    pub fn resolve(&self) -> Result<NewRestaurant, AppError> {
        let name = required(&self.name, "name")?;
        let address = required(&self.address, "address")?;

        let zone = match self.zone.as_deref() {
            Some(zone) if !zone.trim().is_empty() => zone.to_string(),
            _ => DEFAULT_ZONE.to_string(),
        };

        Ok(NewRestaurant {
            zone,
            name,
            address,
            kind: self
                .kind
                .clone()
                .unwrap_or_else(|| DEFAULT_TYPE.to_string()),
            phone: self.phone.clone().unwrap_or_default(),
        })
    }
}

fn required(value: &Option<String>, field: &str) -> Result<String, AppError> {
    match value.as_deref() {
        Some(value) if !value.trim().is_empty() => Ok(value.to_string()),
        Some(_) => Err(AppError::Validation(format!("{field} must not be empty"))),
        None => Err(AppError::Validation(format!("{field} is required"))),
    }
}

/// A validated draft, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRestaurant {
    pub zone: String,
    pub name: String,
    pub address: String,
    pub kind: String,
    pub phone: String,
}

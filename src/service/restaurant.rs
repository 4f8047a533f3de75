//! Restaurant service
//!
//! Owns the record lifecycle: validation, default resolution and the
//! storage calls behind every CRUD operation.

use crate::data::{NewRestaurant, Restaurant, RestaurantDraft, Storage};
use crate::error::AppError;
use crate::metrics::RESTAURANTS_TOTAL;

/// Result of a full listing
///
/// Without storage the listing is empty and `storage_available` is false,
/// rather than an error.
#[derive(Debug, Clone)]
pub struct RestaurantList {
    pub restaurants: Vec<Restaurant>,
    pub storage_available: bool,
}

/// Restaurant service
#[derive(Clone)]
pub struct RestaurantService {
    storage: Storage,
}

impl RestaurantService {
    /// Create new restaurant service
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// All restaurants ordered by zone, then name
    ///
    /// Storage that is missing or cannot be reached yields an empty listing
    /// flagged unavailable. Failures of the query itself are still errors.
    pub async fn list(&self) -> Result<RestaurantList, AppError> {
        let listed = match self.storage.database() {
            Ok(db) => db.list_restaurants().await,
            Err(error) => Err(error),
        };

        match listed {
            Ok(restaurants) => {
                RESTAURANTS_TOTAL.set(restaurants.len() as i64);
                Ok(RestaurantList {
                    restaurants,
                    storage_available: true,
                })
            }
            Err(AppError::StorageUnavailable) => Ok(RestaurantList {
                restaurants: Vec::new(),
                storage_available: false,
            }),
            Err(error) => Err(error),
        }
    }

    /// Get one restaurant
    ///
    /// # Errors
    /// `NotFound` if `id` does not exist
    pub async fn get(&self, id: i64) -> Result<Restaurant, AppError> {
        self.storage
            .database()?
            .get_restaurant(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Create a restaurant from a draft
    ///
    /// # Errors
    /// `StorageUnavailable` without storage, `Validation` if `name` or
    /// `address` is missing
    pub async fn create(&self, draft: &RestaurantDraft) -> Result<Restaurant, AppError> {
        let db = self.storage.database()?;
        let new = draft.resolve()?;

        let restaurant = db.insert_restaurant(new).await?;
        tracing::info!(
            id = restaurant.id,
            zone = %restaurant.zone,
            name = %restaurant.name,
            "Restaurant created"
        );

        Ok(restaurant)
    }

    /// Insert many drafts, optionally replacing everything stored
    ///
    /// Every draft is validated before anything is written; one invalid
    /// draft rejects the whole batch and leaves storage untouched. The
    /// wipe and the inserts commit together.
    ///
    /// # Returns
    /// Number of restaurants inserted
    pub async fn bulk_create(
        &self,
        drafts: &[RestaurantDraft],
        wipe_first: bool,
    ) -> Result<u64, AppError> {
        let db = self.storage.database()?;
        let rows = resolve_batch(drafts)?;

        let inserted = db.insert_restaurants(rows, wipe_first).await?;
        tracing::info!(inserted, wipe_first, "Bulk insert completed");

        Ok(inserted)
    }

    /// Replace every field of an existing restaurant
    ///
    /// Fields missing from the draft fall back to their defaults, not to
    /// the stored values.
    ///
    /// # Errors
    /// `Validation` for an invalid draft, `NotFound` if `id` does not exist
    pub async fn update(&self, id: i64, draft: &RestaurantDraft) -> Result<Restaurant, AppError> {
        let db = self.storage.database()?;
        let new = draft.resolve()?;

        let restaurant = db
            .update_restaurant(id, new)
            .await?
            .ok_or(AppError::NotFound)?;
        tracing::info!(id, "Restaurant updated");

        Ok(restaurant)
    }

    /// Delete one restaurant
    ///
    /// # Errors
    /// `NotFound` if no row was removed
    pub async fn delete_one(&self, id: i64) -> Result<(), AppError> {
        let db = self.storage.database()?;

        if !db.delete_restaurant(id).await? {
            return Err(AppError::NotFound);
        }
        tracing::info!(id, "Restaurant deleted");

        Ok(())
    }

    /// Delete every restaurant
    ///
    /// # Returns
    /// Number of restaurants removed (zero on an empty table)
    pub async fn delete_all(&self) -> Result<u64, AppError> {
        let db = self.storage.database()?;

        let removed = db.delete_all_restaurants().await?;
        tracing::info!(removed, "All restaurants deleted");

        Ok(removed)
    }
}

/// Resolve a batch of drafts, failing on the first invalid one
pub(crate) fn resolve_batch(drafts: &[RestaurantDraft]) -> Result<Vec<NewRestaurant>, AppError> {
    drafts
        .iter()
        .enumerate()
        .map(|(index, draft)| {
            draft.resolve().map_err(|error| match error {
                AppError::Validation(msg) => {
                    AppError::Validation(format!("restaurants[{index}]: {msg}"))
                }
                other => other,
            })
        })
        .collect()
}

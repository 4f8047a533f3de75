//! Sync service
//!
//! Makes a client-held dataset the source of truth. This is a
//! replacement, not a merge: whatever is stored and absent from the
//! submitted dataset is gone afterwards.

use super::restaurant::resolve_batch;
use crate::data::{RestaurantDraft, Storage};
use crate::error::AppError;
use crate::metrics::SYNCS_TOTAL;

/// Sync service
#[derive(Clone)]
pub struct SyncService {
    storage: Storage,
}

impl SyncService {
    /// Create new sync service
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Replace the stored dataset with `drafts`
    ///
    /// Ids submitted by the caller are ignored; every record gets a fresh
    /// id. All drafts are validated first, then the wipe and the inserts
    /// commit as one transaction.
    ///
    /// # Returns
    /// Number of restaurants stored after the sync
    pub async fn sync(&self, drafts: &[RestaurantDraft]) -> Result<u64, AppError> {
        let result = self.replace(drafts).await;

        match &result {
            Ok(count) => {
                SYNCS_TOTAL.with_label_values(&["success"]).inc();
                tracing::info!(count, "Synced restaurants from client");
            }
            Err(error) => {
                SYNCS_TOTAL.with_label_values(&["error"]).inc();
                tracing::warn!(%error, submitted = drafts.len(), "Sync rejected");
            }
        }

        result
    }

    async fn replace(&self, drafts: &[RestaurantDraft]) -> Result<u64, AppError> {
        let db = self.storage.database()?;
        let rows = resolve_batch(drafts)?;
        db.insert_restaurants(rows, true).await
    }
}

//! Service layer
//!
//! Contains business logic separated from HTTP handlers.
//! Services validate drafts and orchestrate storage operations.

mod restaurant;
mod sync;

pub use restaurant::{RestaurantList, RestaurantService};
pub use sync::SyncService;

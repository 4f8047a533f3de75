//! Map placement
//!
//! Pure helpers used by map and report generation: stable
//! pseudo-coordinates, zone reference centers, marker styles and search
//! links. Nothing here touches storage.

mod coordinate;
mod marker;
mod sector;

use std::collections::BTreeMap;

use serde::Serialize;

pub use coordinate::{Coordinate, derive, placement_hash};
pub use marker::MarkerStyle;
pub use sector::{CITY_CENTER, sector_center};

use crate::data::Restaurant;
use crate::error::AppError;

/// A record with its derived position
#[derive(Debug, Clone, Serialize)]
pub struct PlacedRestaurant<'a> {
    pub restaurant: &'a Restaurant,
    pub position: Coordinate,
    pub marker: MarkerStyle,
}

/// Place every record of one batch around `center`
///
/// Each record's batch position feeds the derivation, so the same
/// records in the same order always land on the same points.
pub fn place_batch<'a>(
    center: Coordinate,
    restaurants: &[&'a Restaurant],
) -> Result<Vec<PlacedRestaurant<'a>>, AppError> {
    let total = restaurants.len();
    restaurants
        .iter()
        .enumerate()
        .map(|(index, &restaurant)| -> Result<PlacedRestaurant<'a>, AppError> {
            let position = derive(
                &restaurant.name,
                &restaurant.address,
                center,
                index,
                total,
            )?;
            Ok(PlacedRestaurant {
                restaurant,
                position,
                marker: MarkerStyle::for_type(&restaurant.kind),
            })
        })
        .collect()
}

/// Group records by zone and place each group around its sector center
///
/// Zones come out in ascending order; records keep their input order
/// within a zone.
pub fn place_by_zone(
    restaurants: &[Restaurant],
) -> Result<BTreeMap<String, Vec<PlacedRestaurant<'_>>>, AppError> {
    let mut zones: BTreeMap<String, Vec<&Restaurant>> = BTreeMap::new();
    for restaurant in restaurants {
        zones
            .entry(restaurant.zone.clone())
            .or_default()
            .push(restaurant);
    }

    zones
        .into_iter()
        .map(|(zone, members)| -> Result<(String, Vec<PlacedRestaurant<'_>>), AppError> {
            let placed = place_batch(sector_center(&zone), &members)?;
            Ok((zone, placed))
        })
        .collect()
}

/// Google Maps search link for a record
pub fn maps_search_url(name: &str, address: &str) -> String {
    let query = format!("{name}, {address}, București, Romania");
    format!(
        "https://www.google.com/maps/search/?api=1&query={}",
        urlencoding::encode(&query)
    )
}

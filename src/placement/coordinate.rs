//! Deterministic pseudo-coordinates
//!
//! Places a record near a reference point without geocoding. The position
//! depends only on the record's name and address and on where the record
//! sits in the batch being placed, so regenerating a map never moves a
//! point.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::AppError;

/// Innermost ring, in degrees (about 0.5 km)
const MIN_RADIUS_DEG: f64 = 0.005;

/// `(h mod 1000) / RADIUS_SPREAD` widens the ring up to about 2.5 km
const RADIUS_SPREAD: f64 = 50_000.0;

/// Longitude degrees are shorter than latitude degrees at the reference
/// latitude; this stretches the east-west offset to keep rings round.
const LONGITUDE_STRETCH: f64 = 1.5;

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// First 32 bits (big-endian) of SHA-256 over `name` followed by `address`
pub fn placement_hash(name: &str, address: &str) -> u32 {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update(address.as_bytes());
    let digest = hasher.finalize();
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Derive a stable coordinate around `center`
///
/// `index` is the record's 0-based position in a batch of `total`
/// records; the batch position rotates the point so near-identical
/// hashes still spread out.
///
/// # Errors
/// `Validation` if `total` is zero or `index` is not below `total`
pub fn derive(
    name: &str,
    address: &str,
    center: Coordinate,
    index: usize,
    total: usize,
) -> Result<Coordinate, AppError> {
    if total == 0 {
        return Err(AppError::Validation(
            "placement batch must not be empty".to_string(),
        ));
    }
    if index >= total {
        return Err(AppError::Validation(format!(
            "placement index {index} is outside a batch of {total}"
        )));
    }

    let h = placement_hash(name, address);

    let mut angle = f64::from(h % 360) * (PI / 180.0);
    let radius = MIN_RADIUS_DEG + f64::from(h % 1000) / RADIUS_SPREAD;
    angle += (index as f64 / total as f64) * 2.0 * PI;

    Ok(Coordinate {
        lat: center.lat + radius * angle.cos(),
        lng: center.lng + radius * angle.sin() * LONGITUDE_STRETCH,
    })
}

//! Reference centers for zones
//!
//! Zones "1" to "6" are the Bucharest sectors. Any other zone is placed
//! around the city center.

use super::coordinate::Coordinate;

/// Bucharest city center
pub const CITY_CENTER: Coordinate = Coordinate::new(44.4268, 26.1025);

const SECTOR_CENTERS: [(&str, Coordinate); 6] = [
    ("1", Coordinate::new(44.4720, 26.0850)),
    ("2", Coordinate::new(44.4380, 26.1350)),
    ("3", Coordinate::new(44.4100, 26.1450)),
    ("4", Coordinate::new(44.4050, 26.0900)),
    ("5", Coordinate::new(44.4200, 26.0500)),
    ("6", Coordinate::new(44.4450, 26.0200)),
];

/// Approximate center of the sector a zone code names
pub fn sector_center(zone: &str) -> Coordinate {
    let zone = zone.trim();
    SECTOR_CENTERS
        .iter()
        .find(|(code, _)| *code == zone)
        .map(|(_, center)| *center)
        .unwrap_or(CITY_CENTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_sectors_have_their_own_center() {
        assert_eq!(sector_center("1"), Coordinate::new(44.4720, 26.0850));
        assert_eq!(sector_center(" 6 "), Coordinate::new(44.4450, 26.0200));
    }

    #[test]
    fn unknown_zone_uses_city_center() {
        assert_eq!(sector_center("7"), CITY_CENTER);
        assert_eq!(sector_center("Ilfov"), CITY_CENTER);
    }
}

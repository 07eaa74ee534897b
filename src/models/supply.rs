//! Supply points: locations known to stock a commodity.

use std::cmp::Ordering;

use super::Coordinates;

/// A location stocking a given commodity, with its scoring attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplyPoint {
    pub system: String,
    pub location: String,
    pub coords: Coordinates,
    /// Type-based preference penalty added to the travel distance when scoring.
    pub penalty: u32,
    pub location_type: String,
    pub economy: String,
    /// `"<type> <economy>"`, matched verbatim against the affinity table.
    pub affinity_key: String,
}

impl SupplyPoint {
    /// Identity of the stop this supply point belongs to.
    pub fn stop(&self) -> StopKey {
        StopKey {
            system: self.system.clone(),
            location: self.location.clone(),
            coords: self.coords,
            penalty: self.penalty,
        }
    }

    /// Returns `true` if this entry describes the given system and location.
    pub fn is_at(&self, system: &str, location: &str) -> bool {
        self.system == system && self.location == location
    }
}

/// Identity of a physical stop: several supply points collapse into one
/// candidate when they share system, location, coordinates, and penalty.
///
/// Ordered by system, location, coordinates, then penalty; equality agrees
/// with that order, so `0.0` and `-0.0` are distinct stops.
#[derive(Debug, Clone)]
pub struct StopKey {
    pub system: String,
    pub location: String,
    pub coords: Coordinates,
    pub penalty: u32,
}

impl PartialEq for StopKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for StopKey {}

impl Ord for StopKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.system
            .cmp(&other.system)
            .then_with(|| self.location.cmp(&other.location))
            .then_with(|| self.coords.total_cmp(&other.coords))
            .then_with(|| self.penalty.cmp(&other.penalty))
    }
}

impl PartialOrd for StopKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(system: &str, location: &str, x: f64) -> SupplyPoint {
        SupplyPoint {
            system: system.to_string(),
            location: location.to_string(),
            coords: Coordinates::new(x, 0.0, 0.0),
            penalty: 0,
            location_type: "Coriolis Starport".to_string(),
            economy: "Industrial".to_string(),
            affinity_key: "Coriolis Starport Industrial".to_string(),
        }
    }

    #[test]
    fn test_stop_key_groups_same_location() {
        assert_eq!(point("Sol", "Abraham", 1.0).stop(), point("Sol", "Abraham", 1.0).stop());
        assert_ne!(point("Sol", "Abraham", 1.0).stop(), point("Sol", "Abraham", 2.0).stop());
    }

    #[test]
    fn test_stop_key_order() {
        let a = point("Achenar", "Dawes", 9.0).stop();
        let b = point("Sol", "Abraham", 1.0).stop();
        let c = point("Sol", "Galileo", 0.0).stop();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_stop_key_eq_matches_ord() {
        let pos = point("Sol", "Abraham", 0.0).stop();
        let neg = point("Sol", "Abraham", -0.0).stop();
        assert_ne!(pos, neg);
        assert_eq!(pos == neg, pos.cmp(&neg) == Ordering::Equal);
        assert_eq!(pos.clone(), pos);
    }

    #[test]
    fn test_is_at() {
        let p = point("Sol", "Abraham", 1.0);
        assert!(p.is_at("Sol", "Abraham"));
        assert!(!p.is_at("Sol", "Galileo"));
    }
}

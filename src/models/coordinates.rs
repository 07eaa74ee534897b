//! Coordinates in 3-D space and distance helpers.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A location in 3-D space.
///
/// # Examples
///
/// ```
/// use cargo_planner::models::Coordinates;
///
/// let home = Coordinates::origin();
/// let station = Coordinates::new(3.0, 4.0, 12.0);
/// assert!((home.distance_to(&station) - 13.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coordinates {
    /// Creates a point at the given coordinates.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The origin `(0, 0, 0)`, used as the default home.
    pub fn origin() -> Self {
        Self::default()
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Total order over the three axes, for deterministic tie-breaking.
    pub fn total_cmp(&self, other: &Coordinates) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
            .then_with(|| self.z.total_cmp(&other.z))
    }
}

/// Rounds a distance to two decimals for reporting.
///
/// Running totals must accumulate unrounded values and round once.
pub fn round_distance(d: f64) -> f64 {
    (d * 100.0).round() / 100.0
}

//! Spatial primitives for the abstract city grid.
//!
//! The map is a 100×100 unit square; coordinates are grid units, not
//! geographic degrees. One grid unit is roughly 150 metres, so the whole map
//! spans about 15 km.

use serde::{Deserialize, Serialize};

/// Side length of the world window in grid units.
pub const WORLD_SIZE: f64 = 100.0;

/// Kilometres per grid unit.
pub const GRID_UNIT_KM: f64 = 0.15;

/// Label carried by the synthetic driver position while navigating.
pub const DRIVER_LABEL: &str = "Driver";

/// A labelled point on the map grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPoint {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

impl LocationPoint {
    pub fn new(x: f64, y: f64, label: impl Into<String>) -> Self {
        Self {
            x,
            y,
            label: label.into(),
        }
    }

    /// Straight-line distance in grid units.
    pub fn grid_distance(&self, other: &LocationPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Round to one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Grid distance converted to kilometres, rounded to one decimal.
pub fn distance_km_between(a: &LocationPoint, b: &LocationPoint) -> f64 {
    round_one_decimal(a.grid_distance(b) * GRID_UNIT_KM)
}

/// Linear interpolation between two points, `t` in `[0, 1]`.
///
/// The result is labelled as the driver; it never coincides with a zone label.
pub fn lerp(start: &LocationPoint, end: &LocationPoint, t: f64) -> LocationPoint {
    LocationPoint {
        x: start.x + (end.x - start.x) * t,
        y: start.y + (end.y - start.y) * t,
        label: DRIVER_LABEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_scaled_and_rounded() {
        let a = LocationPoint::new(0.0, 0.0, "a");
        let b = LocationPoint::new(30.0, 40.0, "b");
        assert_eq!(a.grid_distance(&b), 50.0);
        assert_eq!(distance_km_between(&a, &b), 7.5);

        let c = LocationPoint::new(1.0, 1.0, "c");
        // sqrt(2) * 0.15 = 0.2121...
        assert_eq!(distance_km_between(&a, &c), 0.2);
    }

    #[test]
    fn lerp_hits_endpoints_and_midpoint() {
        let start = LocationPoint::new(0.0, 10.0, "start");
        let end = LocationPoint::new(100.0, 30.0, "end");

        let at_start = lerp(&start, &end, 0.0);
        assert_eq!((at_start.x, at_start.y), (0.0, 10.0));

        let mid = lerp(&start, &end, 0.5);
        assert_eq!((mid.x, mid.y), (50.0, 20.0));
        assert_eq!(mid.label, DRIVER_LABEL);

        let at_end = lerp(&start, &end, 1.0);
        assert_eq!((at_end.x, at_end.y), (100.0, 30.0));
    }
}

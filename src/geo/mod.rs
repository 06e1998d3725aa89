//! Geographic math
//!
//! Pure functions for radius search:
//! - Great-circle distance (haversine)
//! - Bounding-box pre-filter around a center point

pub mod bounds;
pub mod distance;

pub use bounds::BoundingBox;
pub use distance::{bounding_box_deltas, haversine_distance};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        validate_latitude(self.lat)?;
        validate_longitude(self.lon)
    }

    /// Distance to another point in kilometers
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        haversine_distance(self.lat, self.lon, other.lat, other.lon)
    }
}

pub(crate) fn validate_latitude(lat: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(Error::InvalidArgument(format!(
            "Latitude {} is out of range [-90, 90]",
            lat
        )));
    }
    Ok(())
}

pub(crate) fn validate_longitude(lon: f64) -> Result<()> {
    if !(-180.0..=180.0).contains(&lon) {
        return Err(Error::InvalidArgument(format!(
            "Longitude {} is out of range [-180, 180]",
            lon
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        assert!(Coordinates::new(40.7128, -74.0060).validate().is_ok());
        assert!(Coordinates::new(90.0, 180.0).validate().is_ok());
        assert!(Coordinates::new(-90.0, -180.0).validate().is_ok());
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(matches!(
            Coordinates::new(91.0, 0.0).validate(),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Coordinates::new(0.0, -180.5).validate(),
            Err(Error::InvalidArgument(_))
        ));
        assert!(Coordinates::new(f64::NAN, 0.0).validate().is_err());
    }
}

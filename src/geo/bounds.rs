//! Bounding-box pre-filter
//!
//! A lat/lon rectangle that contains every point within a radius of a
//! center. Stores range-query against it before the exact haversine check,
//! so it may include extra points but must never drop a true match.

use super::{bounding_box_deltas, Coordinates};
use crate::constants::geo::{BOX_MARGIN_DEG, EARTH_RADIUS_KM, POLE_COS_EPSILON};
use serde::{Deserialize, Serialize};

/// Rectangular lat/lon range in degrees
///
/// Longitude bounds are left unwrapped when the box crosses the antimeridian
/// (e.g. `min_lon = 179.5, max_lon = 180.5`); [`BoundingBox::contains`]
/// accounts for that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Build the box around `center` covering `radius_km`
    ///
    /// Starts from [`bounding_box_deltas`] and widens both half-widths to the
    /// exact spherical extent of the circle where that is larger. The widest
    /// point of a circle sits poleward of its center, so the flat
    /// `r / (111 * cos(lat))` estimate alone undershoots at large radii.
    pub fn around(center: Coordinates, radius_km: f64) -> Self {
        let (lat_delta, lon_delta) = bounding_box_deltas(center.lat, radius_km);
        let angular = radius_km / EARTH_RADIUS_KM;

        let lat_delta = lat_delta.max(angular.to_degrees()) + BOX_MARGIN_DEG;
        let lon_delta = lon_delta.max(spherical_lon_delta(center.lat, angular)) + BOX_MARGIN_DEG;

        let min_lat = (center.lat - lat_delta).max(-90.0);
        let max_lat = (center.lat + lat_delta).min(90.0);

        // A circle reaching over a pole covers every longitude
        let touches_pole = min_lat <= -90.0 || max_lat >= 90.0;

        let (min_lon, max_lon) = if touches_pole || lon_delta >= 180.0 {
            (-180.0, 180.0)
        } else {
            (center.lon - lon_delta, center.lon + lon_delta)
        };

        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Whether the longitude range is unrestricted
    pub fn spans_all_longitudes(&self) -> bool {
        self.max_lon - self.min_lon >= 360.0
    }

    /// Whether the longitude range wraps past ±180
    pub fn crosses_antimeridian(&self) -> bool {
        !self.spans_all_longitudes() && (self.min_lon < -180.0 || self.max_lon > 180.0)
    }

    /// Check if a point lies inside the box
    pub fn contains(&self, point: &Coordinates) -> bool {
        if point.lat < self.min_lat || point.lat > self.max_lat {
            return false;
        }
        self.contains_longitude(point.lon)
    }

    fn contains_longitude(&self, lon: f64) -> bool {
        if self.spans_all_longitudes() {
            return true;
        }
        [lon - 360.0, lon, lon + 360.0]
            .iter()
            .any(|l| (self.min_lon..=self.max_lon).contains(l))
    }
}

/// Longitude half-width in degrees of a circle of `angular` radius (radians)
///
/// Returns 180 when the circle reaches a pole.
fn spherical_lon_delta(center_lat: f64, angular: f64) -> f64 {
    let cos_lat = center_lat.to_radians().cos();
    if angular >= std::f64::consts::FRAC_PI_2 || cos_lat.abs() < POLE_COS_EPSILON {
        return 180.0;
    }
    let ratio = angular.sin() / cos_lat;
    if ratio >= 1.0 {
        180.0
    } else {
        ratio.asin().to_degrees()
    }
}

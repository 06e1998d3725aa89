//! Distance functions
//!
//! All angles are in degrees, all distances in kilometers.

use crate::constants::geo::{EARTH_RADIUS_KM, KM_PER_DEGREE_LAT, POLE_COS_EPSILON};

/// Great-circle distance between two points (Haversine formula)
///
/// # Arguments
/// * `lat1`, `lon1` - First point
/// * `lat2`, `lon2` - Second point
///
/// # Returns
/// Distance in kilometers on a sphere of radius 6371 km
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Angular half-widths of a box containing every point within `radius_km`
///
/// # Returns
/// `(lat_delta, lon_delta)` in degrees. At the poles, where cos(lat) vanishes,
/// `lon_delta` is 180 (every longitude).
pub fn bounding_box_deltas(center_lat: f64, radius_km: f64) -> (f64, f64) {
    let lat_delta = radius_km / KM_PER_DEGREE_LAT;

    let cos_lat = center_lat.to_radians().cos();
    let lon_delta = if cos_lat.abs() < POLE_COS_EPSILON {
        180.0
    } else {
        (radius_km / (KM_PER_DEGREE_LAT * cos_lat)).min(180.0)
    };

    (lat_delta, lon_delta)
}

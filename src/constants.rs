//! Centralized constants for the address-book crate
//!
//! Constants shared by the geo math, the geocoder and the config defaults.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in kilometers
    pub const EARTH_RADIUS_KM: f64 = 6371.0;

    /// Kilometers per degree of latitude (approximate)
    pub const KM_PER_DEGREE_LAT: f64 = 111.0;

    /// Below this cos(latitude) the longitude delta is treated as unbounded
    pub const POLE_COS_EPSILON: f64 = 1e-9;

    /// Slack added to bounding-box half-widths, in degrees
    pub const BOX_MARGIN_DEG: f64 = 1e-9;
}

/// External API endpoints
pub mod api {
    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// User-Agent sent to the geocoder (Nominatim rejects anonymous clients)
    pub const USER_AGENT: &str = "address-book-app";
}

/// Field limits for address records (in characters)
pub mod limits {
    pub const NAME_MAX: usize = 100;
    pub const STREET_MAX: usize = 255;
    pub const CITY_MAX: usize = 100;
    pub const POSTAL_CODE_MAX: usize = 10;
    pub const COUNTRY_MAX: usize = 100;
}

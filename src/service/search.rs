//! Search center selection

use crate::error::{Error, Result};
use crate::geo::Coordinates;

/// Where a radius search is centered
#[derive(Debug, Clone, PartialEq)]
pub enum SearchCenter {
    /// Explicit coordinates
    Point(Coordinates),
    /// Free-text address to geocode
    Address(String),
}

impl SearchCenter {
    /// Pick the center from optional query parameters
    ///
    /// A non-blank `address` wins over coordinates. Without one, both `lat`
    /// and `lon` are required.
    pub fn from_params(lat: Option<f64>, lon: Option<f64>, address: Option<&str>) -> Result<Self> {
        if let Some(address) = address.map(str::trim).filter(|a| !a.is_empty()) {
            return Ok(Self::Address(address.to_string()));
        }

        match (lat, lon) {
            (Some(lat), Some(lon)) => Ok(Self::Point(Coordinates::new(lat, lon))),
            _ => Err(Error::InvalidArgument(
                "Either coordinates or address must be provided".to_string(),
            )),
        }
    }
}

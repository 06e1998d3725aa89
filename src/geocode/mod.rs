//! Geocoding module
//!
//! Resolves free-text addresses to coordinates through an external service.

pub mod nominatim;

pub use nominatim::NominatimGeocoder;

use crate::error::Result;
use crate::geo::Coordinates;
use std::future::Future;

/// Trait for geocoding backends
pub trait Geocoder: Send + Sync {
    /// Resolve a free-text address to coordinates
    ///
    /// Returns `Ok(None)` when the service has no usable answer. `Err` is
    /// reserved for transport failures.
    fn resolve(&self, query: &str) -> impl Future<Output = Result<Option<Coordinates>>> + Send;
}

/// Compose the query string used to geocode a postal address
pub fn address_query(street: &str, city: &str, country: &str) -> String {
    format!("{}, {}, {}", street, city, country)
}

//! Nominatim geocoding backend (OpenStreetMap)
//!
//! Uses the free Nominatim search API.
//! Rate limit: 1 request per second, and a User-Agent is mandatory.

use crate::config::GeocoderConfig;
use crate::error::{Error, Result};
use crate::geo::Coordinates;
use crate::geocode::Geocoder;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Nominatim geocoding backend
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

/// Nominatim search response item
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    /// Create a geocoder from configuration
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Geocoder(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    /// Build the search URL for a query
    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(query)
        )
    }

    /// Parse lat/lon strings to coordinates
    fn parse_coords(lat: &str, lon: &str) -> Result<Coordinates> {
        let lat: f64 = lat
            .parse()
            .map_err(|_| Error::Geocoder(format!("Invalid latitude: {}", lat)))?;
        let lon: f64 = lon
            .parse()
            .map_err(|_| Error::Geocoder(format!("Invalid longitude: {}", lon)))?;
        Ok(Coordinates::new(lat, lon))
    }
}

impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, query: &str) -> Result<Option<Coordinates>> {
        let url = self.search_url(query);
        debug!("Geocoding {:?}", query);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Geocoder(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            warn!("Nominatim returned status {} for {:?}", response.status(), query);
            return Ok(None);
        }

        let results: Vec<NominatimResult> = response
            .json()
            .await
            .map_err(|e| Error::Geocoder(format!("Failed to parse Nominatim response: {}", e)))?;

        match results.into_iter().next() {
            Some(result) => Self::parse_coords(&result.lat, &result.lon).map(Some),
            None => {
                debug!("No geocoding match for {:?}", query);
                Ok(None)
            }
        }
    }
}

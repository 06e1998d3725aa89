//! Address records
//!
//! - `Address`: the persisted record, always carrying coordinates
//! - `NewAddress`: create request, coordinates optional
//! - `AddressPatch`: partial update request

use crate::constants::limits::{CITY_MAX, COUNTRY_MAX, NAME_MAX, POSTAL_CODE_MAX, STREET_MAX};
use crate::error::{Error, Result};
use crate::geo::{validate_latitude, validate_longitude, Coordinates};
use crate::geocode::address_query;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A stored postal address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Unique identifier (UUID v4), assigned at creation
    pub id: String,
    pub name: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Address {
    /// Location of this address
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Query string used to geocode this address
    pub fn geocode_query(&self) -> String {
        address_query(&self.street, &self.city, &self.country)
    }

    /// Overwrite the location
    pub fn set_coordinates(&mut self, coords: Coordinates) {
        self.latitude = coords.lat;
        self.longitude = coords.lon;
    }

    /// Apply the fields present in `patch`
    ///
    /// Returns `false` when the patch cleared a coordinate, in which case the
    /// caller must resolve the location again before persisting.
    pub fn apply(&mut self, patch: AddressPatch) -> bool {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(street) = patch.street {
            self.street = street;
        }
        if let Some(city) = patch.city {
            self.city = city;
        }
        if let Some(postal_code) = patch.postal_code {
            self.postal_code = postal_code;
        }
        if let Some(country) = patch.country {
            self.country = country;
        }

        let lat = patch.latitude.unwrap_or(Some(self.latitude));
        let lon = patch.longitude.unwrap_or(Some(self.longitude));

        match (lat, lon) {
            (Some(lat), Some(lon)) => {
                self.latitude = lat;
                self.longitude = lon;
                true
            }
            _ => false,
        }
    }
}

/// Create request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAddress {
    pub name: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl NewAddress {
    /// Check field lengths and coordinate ranges
    pub fn validate(&self) -> Result<()> {
        check_length("name", &self.name, NAME_MAX)?;
        check_length("street", &self.street, STREET_MAX)?;
        check_length("city", &self.city, CITY_MAX)?;
        check_length("postal_code", &self.postal_code, POSTAL_CODE_MAX)?;
        check_length("country", &self.country, COUNTRY_MAX)?;
        check_coordinates(self.latitude, self.longitude)
    }

    /// Caller-supplied location, if both coordinates were given
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }

    /// Query string used to geocode this address
    pub fn geocode_query(&self) -> String {
        address_query(&self.street, &self.city, &self.country)
    }

    /// Turn the request into a record with a fresh id and timestamps
    pub fn into_address(self, coords: Coordinates) -> Address {
        let now = Utc::now();
        Address {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            street: self.street,
            city: self.city,
            postal_code: self.postal_code,
            country: self.country,
            latitude: coords.lat,
            longitude: coords.lon,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update request body
///
/// For `latitude`/`longitude` an absent key leaves the value alone while an
/// explicit `null` clears it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AddressPatch {
    pub name: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub latitude: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub longitude: Option<Option<f64>>,
}

impl AddressPatch {
    /// Check the supplied fields
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("name", &self.name, NAME_MAX),
            ("street", &self.street, STREET_MAX),
            ("city", &self.city, CITY_MAX),
            ("postal_code", &self.postal_code, POSTAL_CODE_MAX),
            ("country", &self.country, COUNTRY_MAX),
        ];
        for (field, value, max) in fields {
            if let Some(value) = value {
                check_length(field, value, max)?;
            }
        }
        check_coordinates(self.latitude.flatten(), self.longitude.flatten())
    }
}

/// Maps a present key (even `null`) to `Some`
fn present<'de, T, D>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn check_length(field: &str, value: &str, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len > max {
        return Err(Error::InvalidArgument(format!(
            "{} must be at most {} characters (got {})",
            field, max, len
        )));
    }
    Ok(())
}

fn check_coordinates(lat: Option<f64>, lon: Option<f64>) -> Result<()> {
    if let Some(lat) = lat {
        validate_latitude(lat)?;
    }
    if let Some(lon) = lon {
        validate_longitude(lon)?;
    }
    Ok(())
}

//! Address service
//!
//! Business rules around the store:
//! - Every persisted address has coordinates (geocoded on write if missing)
//! - Radius search: bounding-box range query, then exact haversine filter

pub mod search;

pub use search::SearchCenter;

use crate::address::{Address, AddressPatch, NewAddress};
use crate::error::{Error, Result};
use crate::geo::{BoundingBox, Coordinates};
use crate::geocode::Geocoder;
use crate::store::AddressStore;
use chrono::Utc;
use tracing::{debug, info, warn};

/// Address lifecycle and search over a store and a geocoder
#[derive(Debug)]
pub struct AddressService<S, G> {
    store: S,
    geocoder: G,
}

impl<S: AddressStore, G: Geocoder> AddressService<S, G> {
    /// Create a service over the given collaborators
    pub fn new(store: S, geocoder: G) -> Self {
        Self { store, geocoder }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The underlying geocoder
    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Create and persist a new address
    ///
    /// Caller-supplied coordinates are used verbatim; otherwise the address
    /// is geocoded from street, city and country.
    pub async fn create(&self, data: NewAddress) -> Result<Address> {
        data.validate()?;

        let coords = match data.coordinates() {
            Some(coords) => coords,
            None => self.geocode(&data.geocode_query()).await?,
        };

        let address = self.store.insert(data.into_address(coords)).await?;
        info!(id = %address.id, "Created address {:?}", address.name);
        Ok(address)
    }

    /// Retrieve a single address by id
    pub async fn get(&self, id: &str) -> Result<Address> {
        debug!(id, "Fetching address");
        self.store
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Apply a partial update
    ///
    /// If the update leaves either coordinate empty the address is geocoded
    /// again, and the update fails with `GeocodeFailed` if that yields nothing.
    pub async fn update(&self, id: &str, patch: AddressPatch) -> Result<Address> {
        patch.validate()?;

        let mut address = self.get(id).await?;
        if !address.apply(patch) {
            let coords = self.geocode(&address.geocode_query()).await?;
            address.set_coordinates(coords);
        }
        address.updated_at = Utc::now();

        let updated = self
            .store
            .update(address)
            .await?
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        info!(id, "Updated address");
        Ok(updated)
    }

    /// Delete an address permanently
    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(Error::NotFound(id.to_string()));
        }
        info!(id, "Deleted address");
        Ok(())
    }

    /// All addresses within `radius_km` of `center`, in storage order
    pub async fn search_within_radius(
        &self,
        center: Coordinates,
        radius_km: f64,
    ) -> Result<Vec<Address>> {
        validate_radius(radius_km)?;
        center.validate()?;

        let bounds = BoundingBox::around(center, radius_km);
        let candidates = self.store.range_query(&bounds).await?;
        let candidate_count = candidates.len();

        let matches: Vec<Address> = candidates
            .into_iter()
            .filter(|a| center.distance_km(&a.coordinates()) <= radius_km)
            .collect();

        debug!(
            lat = center.lat,
            lon = center.lon,
            radius_km,
            "Radius search: {} candidates, {} matches",
            candidate_count,
            matches.len()
        );
        Ok(matches)
    }

    /// Turn a search center into coordinates, geocoding if needed
    pub async fn resolve_center(&self, center: SearchCenter) -> Result<Coordinates> {
        match center {
            SearchCenter::Point(coords) => {
                coords.validate()?;
                Ok(coords)
            }
            SearchCenter::Address(query) => self.geocode(&query).await,
        }
    }

    /// Resolve the center and run a radius search
    pub async fn search(&self, center: SearchCenter, radius_km: f64) -> Result<Vec<Address>> {
        validate_radius(radius_km)?;
        let coords = self.resolve_center(center).await?;
        self.search_within_radius(coords, radius_km).await
    }

    /// Geocode a query, treating "no result" as `GeocodeFailed`
    async fn geocode(&self, query: &str) -> Result<Coordinates> {
        let coords = self.geocoder.resolve(query).await?.ok_or_else(|| {
            warn!("No geocoding result for {:?}", query);
            Error::GeocodeFailed(format!("Unable to geocode address: {}", query))
        })?;

        coords.validate().map_err(|_| {
            Error::GeocodeFailed(format!(
                "Geocoder returned out-of-range coordinates for {}",
                query
            ))
        })?;
        Ok(coords)
    }
}

fn validate_radius(radius_km: f64) -> Result<()> {
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(Error::InvalidArgument(format!(
            "Radius must be greater than zero (got {})",
            radius_km
        )));
    }
    Ok(())
}

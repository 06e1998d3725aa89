//! Server shared state
//!
//! Holds configuration and the address service for the HTTP server.

use crate::config::Config;
use crate::geocode::Geocoder;
use crate::service::AddressService;
use crate::store::AddressStore;
use std::time::Instant;

/// Shared state for the HTTP server
pub struct AppState<S, G> {
    /// Configuration
    pub config: Config,

    /// Address lifecycle and search
    pub service: AddressService<S, G>,

    started: Instant,
}

impl<S: AddressStore, G: Geocoder> AppState<S, G> {
    /// Create new application state
    pub fn new(config: Config, service: AddressService<S, G>) -> Self {
        Self {
            config,
            service,
            started: Instant::now(),
        }
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}

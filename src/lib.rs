//! address-book: Postal Address API with Radius Search
//!
//! A library and HTTP service for storing postal addresses and finding the
//! ones within a radius of a point or of a geocoded address.
//!
//! ## Features
//!
//! - Create, read, update and delete address records
//! - Geocoding on write when coordinates are missing (Nominatim)
//! - Radius search: bounding-box pre-filter, then exact haversine distance
//! - In-memory or JSON-file storage
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use address_book::geo::{haversine_distance, BoundingBox, Coordinates};
//!
//! let nyc = Coordinates::new(40.7128, -74.0060);
//! let bbox = BoundingBox::around(nyc, 5.0); // 5 km
//!
//! let nearby = Coordinates::new(40.73, -73.99);
//! assert!(bbox.contains(&nearby));
//! assert!(haversine_distance(nyc.lat, nyc.lon, nearby.lat, nearby.lon) < 5.0);
//! ```

pub mod address;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod geo;
pub mod geocode;
pub mod logging;
pub mod server;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use address::{Address, AddressPatch, NewAddress};
pub use config::Config;
pub use error::{Error, Result};
pub use geo::{BoundingBox, Coordinates};
pub use service::{AddressService, SearchCenter};

//! Geocode command handler
//!
//! Resolves an address with the configured geocoder, useful for checking
//! connectivity before running the server.

use crate::error::{Error, Result};
use crate::geocode::{Geocoder, NominatimGeocoder};
use clap::Args;
use std::path::Path;

/// Geocode command arguments
#[derive(Args)]
pub struct GeocodeArgs {
    /// Free-text address, e.g. "10 Downing St, London, UK"
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Print JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}

/// Run the geocode command
pub async fn run(args: GeocodeArgs, config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let geocoder = NominatimGeocoder::new(&config.geocoder)?;

    let query = args.query.join(" ");
    let coords = geocoder
        .resolve(&query)
        .await?
        .ok_or_else(|| Error::GeocodeFailed(format!("No result for {:?}", query)))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&coords)?);
    } else {
        println!("{:.6}, {:.6}", coords.lat, coords.lon);
    }

    Ok(())
}

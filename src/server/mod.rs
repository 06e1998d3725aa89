//! HTTP server for address-book
//!
//! Provides the REST API for address records and radius search.

pub mod routes;
pub mod state;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::geocode::{Geocoder, NominatimGeocoder};
use crate::service::AddressService;
use crate::store::{AddressStore, JsonFileStore, MemoryStore, StorageKind};
use routes::create_router;
use state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Start the HTTP server with the collaborators named in `config`
///
/// # Arguments
/// * `config` - Server configuration
///
/// # Returns
/// Never returns unless the server shuts down
pub async fn run(config: Config) -> Result<()> {
    let geocoder = NominatimGeocoder::new(&config.geocoder)?;

    match config.storage.kind()? {
        StorageKind::Memory => {
            warn!("Using in-memory storage; addresses are lost on shutdown");
            serve(config, MemoryStore::new(), geocoder).await
        }
        StorageKind::File => {
            let path = config.storage.resolved_path()?;
            let store = JsonFileStore::open(&path).await?;
            info!("Using address store at {}", path.display());
            serve(config, store, geocoder).await
        }
    }
}

/// Serve the API over explicit collaborators until Ctrl-C
pub async fn serve<S, G>(config: Config, store: S, geocoder: G) -> Result<()>
where
    S: AddressStore + 'static,
    G: Geocoder + 'static,
{
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| Error::Server(format!("Invalid server address: {}", e)))?;

    let service = AddressService::new(store, geocoder);
    let state = Arc::new(AppState::new(config, service));
    let app = create_router(state);

    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Server(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::Server(format!("Server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

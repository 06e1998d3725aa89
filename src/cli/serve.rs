//! Serve command handler
//!
//! Starts the HTTP server in foreground mode.

use crate::error::Result;
use crate::store::StorageKind;
use crate::{logging, server};
use clap::Args;
use std::path::Path;
use tracing::info;

/// Serve command arguments
#[derive(Args)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Storage backend (memory or file)
    #[arg(long)]
    pub storage: Option<String>,

    /// Log at debug level
    #[arg(long)]
    pub debug: bool,
}

/// Run the serve command
pub async fn run(args: ServeArgs, config_path: Option<&Path>) -> Result<()> {
    // Load and optionally override config
    let mut config = super::load_config(config_path)?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(storage) = args.storage {
        storage
            .parse::<StorageKind>()
            .map_err(crate::error::Error::Config)?;
        config.storage.backend = storage;
    }
    if args.debug {
        config.logging.debug = true;
    }

    let _guard = logging::init(&config.logging)?;

    info!(
        "Starting address-book server v{} on {}",
        env!("CARGO_PKG_VERSION"),
        config.server_addr()
    );

    server::run(config).await
}

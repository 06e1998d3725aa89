//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod geocode;
pub mod serve;

use crate::config::Config;
use crate::error::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Postal address API with radius search
#[derive(Parser)]
#[command(name = "address-book")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Use this config file instead of the XDG default
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Resolve a free-text address to coordinates
    Geocode(geocode::GeocodeArgs),
}

/// Load the config from `path` or the default location
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Serve(args) => serve::run(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path),
        Commands::Geocode(args) => geocode::run(args, config_path).await,
    }
}

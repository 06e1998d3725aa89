//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;
use std::path::Path;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "server.port")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs, config_path: Option<&Path>) -> Result<()> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => Config::config_path()?,
    };

    if args.path {
        println!("{}", path.display());
        return Ok(());
    }

    if args.reset {
        Config::default().save_to(&path)?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load_from(&path)?;

    match (&args.key, &args.value) {
        // No arguments: show all config
        (None, None) => show_all_config(&config),

        // Key only: show that value
        (Some(key), None) => match config.get(key) {
            Some(value) => println!("{}", value),
            None => {
                return Err(Error::Config(format!(
                    "Unknown config key: {} (available: {})",
                    key,
                    Config::available_keys().join(", ")
                )));
            }
        },

        // Key and value: set the value
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save_to(&path)?;
            println!("{} = {}", key, value);
        }

        (None, Some(_)) => {
            return Err(Error::Config("Must specify a key to set a value".to_string()));
        }
    }

    Ok(())
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    let mut section = "";
    for key in Config::available_keys() {
        let (name, field) = key.split_once('.').unwrap_or(("", key));
        if name != section {
            if !section.is_empty() {
                println!();
            }
            println!("[{}]", name);
            section = name;
        }
        let value = config.get(key).unwrap_or_default();
        if value.is_empty() {
            println!("{} = \"\" # not set", field);
        } else {
            println!("{} = \"{}\"", field, value);
        }
    }
}

//! Default configuration values
//!
//! Named constants for all tunable parameters

use crate::constants::api::{NOMINATIM_URL, USER_AGENT};

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8000;

/// Default geocoding service base URL
pub const DEFAULT_GEOCODER_URL: &str = NOMINATIM_URL;

/// Default User-Agent for geocoding requests
pub const DEFAULT_USER_AGENT: &str = USER_AGENT;

/// Default geocoding request timeout in seconds
pub const DEFAULT_GEOCODER_TIMEOUT_SECS: u64 = 10;

/// Default storage backend
pub const DEFAULT_STORAGE_BACKEND: &str = "file";

/// Default log level (overridden by RUST_LOG)
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Address store file name
pub const STORE_FILE_NAME: &str = "addresses.json";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "address-book";

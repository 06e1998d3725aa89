//! Error types for address-book

use thiserror::Error;

/// Main error type for address-book operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Address not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Geocoding failed: {0}")]
    GeocodeFailed(String),

    /// The geocoding service could not be reached or answered garbage
    #[error("Geocoder unavailable: {0}")]
    Geocoder(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for errors caused by the caller's input, false for infrastructure failures
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_) | Error::InvalidArgument(_) | Error::GeocodeFailed(_)
        )
    }
}

/// Result type alias for address-book operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(Error::NotFound("x".into()).is_client_error());
        assert!(Error::InvalidArgument("x".into()).is_client_error());
        assert!(Error::GeocodeFailed("x".into()).is_client_error());
    }

    #[test]
    fn test_infrastructure_errors() {
        assert!(!Error::Geocoder("timeout".into()).is_client_error());
        assert!(!Error::Store("disk full".into()).is_client_error());
    }
}

//! Error types for the forecasting core and its configuration.

/// Raised when a raw record cannot be matched to any known DONKI shape.
///
/// Snapshot assembly recovers from it locally; it never escapes
/// [`crate::parsing::donki::process_solar_data`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IngestError {
    #[error("Unrecognized record shape: expected a JSON object, found {found}")]
    UnrecognizedShape { found: &'static str },
}

/// Error type for invalid forecast inputs
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ForecastError {
    #[error("Latitude must be within [-90, 90] degrees, got {0}")]
    InvalidLatitude(f64),

    #[error("Longitude must be within [-180, 180] degrees, got {0}")]
    InvalidLongitude(f64),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Error type for configuration loading and validation
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("No aurora.toml found in standard locations")]
    NotFound,

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

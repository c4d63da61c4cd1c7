//! Configuration file support.
//!
//! The forecasting core takes no configuration. This module configures its
//! collaborators: the DONKI ingestion client and the watch-list of locations the
//! dashboard forecasts for.
//!
//! ```toml
//! [donki]
//! api_key = "DEMO_KEY"
//! lookback_days = 30
//!
//! [[locations]]
//! name = "Inari"
//! latitude = 68.91
//! longitude = 27.03
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::domain::NamedLocation;
use crate::error::{ConfigError, ConfigResult};

/// Environment variable overriding `donki.api_key`.
pub const API_KEY_ENV: &str = "NASA_API_KEY";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuroraConfig {
    #[serde(default)]
    pub donki: DonkiSettings,
    #[serde(default = "default_locations")]
    pub locations: Vec<NamedLocation>,
}

/// DONKI API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonkiSettings {
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Days of history requested from each feed
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_key() -> String {
    "DEMO_KEY".to_string()
}

fn default_base_url() -> String {
    "https://api.nasa.gov".to_string()
}

fn default_lookback_days() -> u32 {
    30
}

fn default_timeout_secs() -> u64 {
    30
}

/// Finnish cities shown on the default dashboard.
fn default_locations() -> Vec<NamedLocation> {
    [
        ("Helsinki", 60.17, 24.94),
        ("Espoo", 60.21, 24.66),
        ("Vantaa", 60.29, 25.04),
        ("Tampere", 61.50, 23.79),
        ("Oulu", 65.01, 25.47),
        ("Turku", 60.45, 22.27),
        ("Jyväskylä", 62.24, 25.75),
        ("Lahti", 60.98, 25.66),
        ("Kuopio", 62.89, 27.68),
        ("Rovaniemi", 66.50, 25.73),
        ("Sodankylä", 67.42, 26.59),
        ("Inari", 68.91, 27.03),
        ("Kilpisjärvi", 69.05, 20.79),
    ]
    .into_iter()
    .map(|(name, latitude, longitude)| NamedLocation::new(name, latitude, longitude))
    .collect()
}

impl Default for DonkiSettings {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            base_url: default_base_url(),
            lookback_days: default_lookback_days(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for AuroraConfig {
    fn default() -> Self {
        Self {
            donki: DonkiSettings::default(),
            locations: default_locations(),
        }
    }
}

impl AuroraConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(AuroraConfig)` if the file was read, parsed and validated
    /// * `Err(ConfigError)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: AuroraConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `aurora.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> ConfigResult<Self> {
        let search_paths = [
            PathBuf::from("aurora.toml"),
            PathBuf::from("rust_backend/aurora.toml"),
            PathBuf::from("../aurora.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Loading configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::NotFound)
    }

    /// Apply environment overrides (`NASA_API_KEY`).
    pub fn with_env_overrides(self) -> Self {
        self.with_api_key_override(std::env::var(API_KEY_ENV).ok())
    }

    fn with_api_key_override(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.donki.api_key = key;
        }
        self
    }

    /// Check settings and watch-list coordinates.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.donki.lookback_days == 0 {
            return Err(ConfigError::Invalid(
                "donki.lookback_days must be at least 1".to_string(),
            ));
        }
        if self.donki.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "donki.timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.donki.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("donki.base_url is empty".to_string()));
        }
        for location in &self.locations {
            location.geo().map_err(|e| {
                ConfigError::Invalid(format!("location '{}': {}", location.name, e))
            })?;
        }
        Ok(())
    }
}

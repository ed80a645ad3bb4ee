//! Configuration types for the loot split service.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use std::path::PathBuf;

use serde::Deserialize;

/// Default appraisal endpoint: Jita buy prices, immediate pricing.
pub const DEFAULT_APPRAISAL_ENDPOINT: &str = "https://janice.e-351.com/api/rest/v2/appraisal?market=2&designation=appraisal&pricing=buy&pricingVariant=immediate&persist=true&compactize=true&pricePercentage=1";

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_appraisal_endpoint() -> String {
    DEFAULT_APPRAISAL_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

/// Where the JSON stores live.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding saved splits, roster, and trust list files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl StorageConfig {
    /// Path of the saved splits file.
    pub fn splits_path(&self) -> PathBuf {
        self.data_dir.join("loot_splits.json")
    }

    /// Path of the roster file.
    pub fn roster_path(&self) -> PathBuf {
        self.data_dir.join("roster.json")
    }

    /// Path of the trust list file.
    pub fn trust_path(&self) -> PathBuf {
        self.data_dir.join("trusted.json")
    }
}

/// Appraisal service settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AppraisalConfig {
    /// Full appraisal URL including market and pricing query parameters.
    #[serde(default = "default_appraisal_endpoint")]
    pub endpoint: String,
    /// API key. Falls back to the `API_KEY` variable, then `apikey.txt`.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AppraisalConfig {
    fn default() -> Self {
        Self {
            endpoint: default_appraisal_endpoint(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Roster settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterConfig {
    /// Pilots always on the roster unless explicitly removed.
    #[serde(default)]
    pub seed_pilots: Vec<String>,
}

/// The complete service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Store settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Appraisal service settings.
    #[serde(default)]
    pub appraisal: AppraisalConfig,
    /// Roster settings.
    #[serde(default)]
    pub roster: RosterConfig,
}

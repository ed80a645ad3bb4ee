//! Configuration loading for the loot split service.
//!
//! This module loads the service configuration from a YAML file: server bind
//! address, store directory, appraisal endpoint, and roster seed pilots.
//!
//! # Example
//!
//! ```no_run
//! use loot_split::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/loot-split.yaml").unwrap();
//! println!("Data directory: {}", config.config().storage.data_dir.display());
//! ```

mod loader;
mod types;

pub use loader::{API_KEY_ENV, API_KEY_FILE, ConfigLoader, DEFAULT_CONFIG_PATH, resolve_api_key_from};
pub use types::{
    AppConfig, AppraisalConfig, DEFAULT_APPRAISAL_ENDPOINT, RosterConfig, ServerConfig,
    StorageConfig,
};

//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from a YAML file.

use std::env;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{LootError, LootResult};

use super::types::AppConfig;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config/loot-split.yaml";

/// Environment variable consulted for the appraisal API key.
pub const API_KEY_ENV: &str = "API_KEY";

/// File consulted for the appraisal API key when nothing else provides one.
pub const API_KEY_FILE: &str = "apikey.txt";

/// Loads and provides access to the service configuration.
///
/// # File Format
///
/// ```text
/// server:
///   bind_address: "0.0.0.0:8080"
/// storage:
///   data_dir: "data"
/// appraisal:
///   endpoint: "https://janice.e-351.com/api/rest/v2/appraisal?..."
///   timeout_secs: 30
/// roster:
///   seed_pilots: ["Kira Vale", "Ansel Moss"]
/// ```
///
/// Every section is optional and falls back to defaults.
///
/// # Example
///
/// ```no_run
/// use loot_split::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/loot-split.yaml").unwrap();
/// println!("Listening on {}", loader.config().server.bind_address);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> LootResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| LootError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let loader = Self::from_yaml(&content, &path_str)?;
        debug!(path = %path_str, "Loaded configuration");
        Ok(loader)
    }

    /// Parses configuration from YAML text. `origin` names the source in errors.
    pub fn from_yaml(content: &str, origin: &str) -> LootResult<Self> {
        // An empty document means "all defaults".
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config =
            serde_yaml::from_str::<AppConfig>(content).map_err(|e| LootError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Resolves the appraisal API key.
    ///
    /// Order: the configured value, the `API_KEY` environment variable, then
    /// `apikey.txt` in the working directory. Blank values are skipped.
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_api_key_from(
            self.config.appraisal.api_key.as_deref(),
            env::var(API_KEY_ENV).ok().as_deref(),
            Path::new(API_KEY_FILE),
        )
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Resolves the API key from explicit sources; see [`ConfigLoader::resolve_api_key`].
pub fn resolve_api_key_from(
    configured: Option<&str>,
    from_env: Option<&str>,
    key_file: &Path,
) -> Option<String> {
    non_blank(configured)
        .or_else(|| non_blank(from_env))
        .or_else(|| {
            debug!(path = %key_file.display(), "API key not configured, trying key file");
            non_blank(fs::read_to_string(key_file).ok().as_deref())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_full_config() {
        let yaml = r#"
server:
  bind_address: "127.0.0.1:9000"
storage:
  data_dir: "/var/lib/loot"
appraisal:
  endpoint: "http://localhost:1234/appraise"
  api_key: "secret"
  timeout_secs: 5
roster:
  seed_pilots:
    - "Kira Vale"
    - "Ansel Moss"
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let loader = ConfigLoader::load(file.path()).unwrap();
        let config = loader.config();

        assert_eq!(config.server.bind_address, "127.0.0.1:9000");
        assert_eq!(
            config.storage.splits_path(),
            Path::new("/var/lib/loot/loot_splits.json")
        );
        assert_eq!(config.appraisal.endpoint, "http://localhost:1234/appraise");
        assert_eq!(config.appraisal.timeout_secs, 5);
        assert_eq!(config.roster.seed_pilots, vec!["Kira Vale", "Ansel Moss"]);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let loader = ConfigLoader::from_yaml("server:\n  bind_address: \"0.0.0.0:1\"\n", "inline")
            .unwrap();
        let config = loader.config();

        assert_eq!(config.server.bind_address, "0.0.0.0:1");
        assert_eq!(config.storage.data_dir, Path::new("data"));
        assert!(config.appraisal.endpoint.starts_with("https://janice.e-351.com"));
        assert!(config.roster.seed_pilots.is_empty());
    }

    #[test]
    fn test_empty_document_is_default() {
        let loader = ConfigLoader::from_yaml("  \n", "inline").unwrap();
        assert_eq!(loader.config().server.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_missing_file_returns_config_not_found() {
        match ConfigLoader::load("/nonexistent/loot-split.yaml").unwrap_err() {
            LootError::ConfigNotFound { path } => {
                assert!(path.contains("loot-split.yaml"));
            }
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        match ConfigLoader::from_yaml("server: [unclosed", "bad.yaml").unwrap_err() {
            LootError::ConfigParseError { path, .. } => assert_eq!(path, "bad.yaml"),
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_api_key_prefers_configured_value() {
        let key = resolve_api_key_from(Some("cfg"), Some("env"), Path::new("/nonexistent"));
        assert_eq!(key.as_deref(), Some("cfg"));
    }

    #[test]
    fn test_api_key_falls_back_to_env_then_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "  from-file  ").unwrap();

        let key = resolve_api_key_from(Some(" "), Some("env"), file.path());
        assert_eq!(key.as_deref(), Some("env"));

        let key = resolve_api_key_from(None, None, file.path());
        assert_eq!(key.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_api_key_absent_everywhere() {
        assert!(resolve_api_key_from(None, None, Path::new("/nonexistent/apikey.txt")).is_none());
    }
}

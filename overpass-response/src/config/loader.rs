use crate::config::types::OverpassConfig;
use crate::error::{OverpassError, Result};
use std::path::Path;

/// Configuration loader trait
pub trait ConfigLoader {
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<OverpassConfig>;
    fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<OverpassConfig>;
}

/// Default configuration loader implementation
pub struct DefaultConfigLoader;

impl ConfigLoader for DefaultConfigLoader {
    /// Load configuration from a turbo.toml file
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<OverpassConfig> {
        let content = std::fs::read_to_string(&path).map_err(|_| OverpassError::ConfigNotFound {
            path: path.as_ref().to_path_buf(),
        })?;

        let config: OverpassConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration and check that the values are usable
    fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<OverpassConfig> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(OverpassError::ConfigNotFound {
                path: path_ref.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path_ref).map_err(OverpassError::Io)?;

        let config: OverpassConfig = toml::from_str(&content).map_err(|e| {
            OverpassError::invalid_config(format!(
                "Failed to parse TOML in {}: {}",
                path_ref.display(),
                e
            ))
        })?;

        validate(&config, path_ref)?;
        Ok(config)
    }
}

/// Check a configuration for values the client cannot work with
pub fn validate<P: AsRef<Path>>(config: &OverpassConfig, config_path: P) -> Result<()> {
    let config_path_str = config_path.as_ref().to_string_lossy();

    if config.server.trim().is_empty() {
        return Err(OverpassError::invalid_config(format!(
            "No server configured in {config_path_str}. Set `server` to an Overpass API base URL."
        )));
    }

    let url = config.server_url().map_err(|e| {
        OverpassError::invalid_config(format!(
            "Invalid server URL '{}' in {config_path_str}: {e}",
            config.server
        ))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(OverpassError::invalid_config(format!(
            "Unsupported scheme '{}' for server in {config_path_str}. Use http or https.",
            url.scheme()
        )));
    }

    if config.timeout_seconds == 0 {
        return Err(OverpassError::invalid_config(format!(
            "timeout_seconds in {config_path_str} must be greater than zero"
        )));
    }

    Ok(())
}

impl OverpassConfig {
    /// Load configuration from a turbo.toml file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        DefaultConfigLoader::load_from_file(path)
    }

    /// Load configuration with validation and enhanced error context
    pub fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<Self> {
        DefaultConfigLoader::load_with_validation(path)
    }

    /// Load the file if it exists, otherwise fall back to the defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load_with_validation(path)
        } else {
            tracing::debug!(path = %path.as_ref().display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }
}

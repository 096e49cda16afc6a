//! Configuration management for the tracker
//!
//! This module handles loading, validation, and management of the service
//! configuration.

pub mod loader;
pub mod models;

pub use loader::ENV_PREFIX;
pub use models::*;

use crate::utils::error::{Result, TrackerError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/annotrack.yaml";

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No file at this path; defaults were used
    Defaults(PathBuf),
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded configuration from {:?}", path),
            ConfigSource::Defaults(path) => info!(
                "Config file {:?} not found, using default configuration",
                path
            ),
        }
    }
}

/// Main configuration struct for the tracker
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Service configuration
    pub service: ServiceConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| TrackerError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        // an empty document is a valid, all-defaults configuration
        let service: ServiceConfig = if content.trim().is_empty() {
            ServiceConfig::default()
        } else {
            serde_yaml::from_str(content)
                .map_err(|e| TrackerError::Config(format!("Failed to parse config: {}", e)))?
        };

        let config = Self { service };
        config.validate()?;
        Ok(config)
    }

    /// Load the file at `path` if it exists, otherwise start from defaults,
    /// then apply environment overrides.
    ///
    /// This usually runs before logging is set up, so the returned
    /// [`ConfigSource`] is logged by the caller once it is.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<(Self, ConfigSource)> {
        let path = path.as_ref();

        let (mut config, source) = if path.exists() {
            (
                Self::from_file(path).await?,
                ConfigSource::File(path.to_path_buf()),
            )
        } else {
            (Self::default(), ConfigSource::Defaults(path.to_path_buf()))
        };

        config.service.apply_env()?;
        config.validate()?;
        Ok((config, source))
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.service.server
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.service.storage
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.service.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.service
            .server
            .validate()
            .map_err(|e| TrackerError::Config(format!("Server config error: {}", e)))?;

        self.service
            .server
            .cors
            .validate()
            .map_err(|e| TrackerError::Config(format!("CORS config error: {}", e)))?;

        self.service
            .storage
            .validate()
            .map_err(|e| TrackerError::Config(format!("Storage config error: {}", e)))?;

        self.service
            .logging
            .validate()
            .map_err(|e| TrackerError::Config(format!("Logging config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.service = self.service.merge(other.service);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.service)
            .map_err(|e| TrackerError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

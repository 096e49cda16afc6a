//! Storage configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Backends accepted by `storage.backend`
pub const STORAGE_BACKENDS: &[&str] = &["memory", "csv"];

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend name, `memory` or `csv`
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Directory holding the table files of the `csv` backend
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Reject writes that would store an id twice
    #[serde(default = "default_true")]
    pub unique_ids: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            data_dir: default_data_dir(),
            unique_ids: true,
        }
    }
}

impl StorageConfig {
    /// Merge storage configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.backend != default_backend() {
            self.backend = other.backend;
        }
        if other.data_dir != default_data_dir() {
            self.data_dir = other.data_dir;
        }
        if !other.unique_ids {
            self.unique_ids = false;
        }
        self
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), String> {
        if !STORAGE_BACKENDS.contains(&self.backend.as_str()) {
            return Err(format!(
                "Unsupported storage backend '{}', expected one of: {}",
                self.backend,
                STORAGE_BACKENDS.join(", ")
            ));
        }

        if self.backend == "csv" && self.data_dir.trim().is_empty() {
            return Err("Data directory is required for the csv backend".to_string());
        }

        Ok(())
    }
}

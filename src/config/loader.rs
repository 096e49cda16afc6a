//! Configuration loading utilities
//!
//! Environment overrides applied on top of the file configuration.

use super::models::*;
use crate::utils::error::{Result, TrackerError};
use std::env;
use std::str::FromStr;
use tracing::debug;

/// Prefix of every environment override
pub const ENV_PREFIX: &str = "ANNOTRACK_";

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| TrackerError::Config(format!("Invalid {}{}: {}", ENV_PREFIX, key, e)))
}

impl ServiceConfig {
    /// Apply `ANNOTRACK_*` environment variables
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(format!("{}{}", ENV_PREFIX, key)).ok())
    }

    /// Apply overrides looked up by unprefixed key (`HOST`, `PORT`, ...)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_var("PORT", &port)?;
        }
        if let Some(workers) = lookup("WORKERS") {
            self.server.workers = Some(parse_var("WORKERS", &workers)?);
        }
        if let Some(endpoint) = lookup("ENDPOINT") {
            self.server.endpoint = endpoint;
        }

        if let Some(backend) = lookup("STORAGE_BACKEND") {
            self.storage.backend = backend.trim().to_ascii_lowercase();
        }
        if let Some(data_dir) = lookup("DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.format = format.parse().map_err(TrackerError::Config)?;
        }

        debug!("Environment overrides applied");
        Ok(())
    }
}

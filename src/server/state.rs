//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::store::{RecordStore, StoreOptions};
use crate::storage;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for sharing across worker threads.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Record store over the configured backend
    pub store: Arc<RecordStore>,
    /// Process start time, reported by the health check
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, store: RecordStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            started_at: Utc::now(),
        }
    }

    /// Open the configured storage backend and build the state around it
    pub async fn open(config: Config) -> Result<Self> {
        let sheets = storage::open(config.storage()).await?;
        let options = StoreOptions {
            unique_ids: config.storage().unique_ids,
        };
        let store = RecordStore::open(sheets, options).await?;
        Ok(Self::new(config, store))
    }

    /// Get service configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

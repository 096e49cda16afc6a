//! # annotrack
//!
//! Record store for annotation batches and work logs over spreadsheet-shaped
//! tables, served over HTTP.
//!
//! ## Features
//!
//! - **Two collections**: batches and the logs that reference them, keyed by id
//! - **Tabular storage**: a header row plus data rows per table, kept in memory
//!   or in CSV files
//! - **Action API**: `GET /exec?action=..&data=..` and `POST /exec` with a JSON
//!   body, always answered with a `{success, error?, batches?, logs?}` envelope
//! - **Cascade delete**: removing a batch removes its logs
//!
//! ## Library use
//!
//! ```rust,no_run
//! use annotrack::core::models::Batch;
//! use annotrack::core::store::{RecordStore, StoreOptions};
//! use annotrack::storage::MemorySheetStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = RecordStore::open(Arc::new(MemorySheetStore::new()), StoreOptions::default()).await?;
//!     store.add(Batch::new("11", "10000_13000", "camera1")).await?;
//!
//!     let all = store.list_all().await?;
//!     println!("{} batches, {} logs", all.batches.len(), all.logs.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Server mode
//!
//! ```rust,no_run
//! use annotrack::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (config, _source) = Config::load("config/annotrack.yaml").await?;
//!     annotrack::server::run_server(config).await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::models::{Batch, BatchStatus, Log};
pub use core::store::{Collections, RecordStore, StoreOptions};
pub use utils::error::{Result, TrackerError};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build time, seconds since the epoch
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: option_env!("BUILD_TIME").unwrap_or("unknown"),
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
            rust_version: option_env!("RUST_VERSION").unwrap_or("unknown"),
        }
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}

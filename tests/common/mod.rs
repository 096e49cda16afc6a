//! Common test utilities for annotrack
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::{fixtures, memory_store};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let store = memory_store().await;
//!     store.add(fixtures::BatchFactory::create("1")).await.unwrap();
//! }
//! ```

pub mod fixtures;

pub use fixtures::{BatchFactory, LogFactory};

use annotrack::config::Config;
use annotrack::core::store::{RecordStore, StoreOptions};
use annotrack::server::AppState;
use annotrack::storage::{CsvSheetStore, MemorySheetStore};
use actix_web::web;
use std::path::Path;
use std::sync::Arc;

/// Record store over a fresh in-memory backend
pub async fn memory_store() -> RecordStore {
    RecordStore::open(Arc::new(MemorySheetStore::new()), StoreOptions::default())
        .await
        .expect("Failed to open memory store")
}

/// Record store over CSV files in `dir`
pub async fn csv_store(dir: &Path) -> RecordStore {
    let sheets = CsvSheetStore::new(dir)
        .await
        .expect("Failed to create CSV storage");
    RecordStore::open(Arc::new(sheets), StoreOptions::default())
        .await
        .expect("Failed to open CSV store")
}

/// Application state over a memory backend with the given config
pub async fn app_state(config: Config) -> web::Data<AppState> {
    web::Data::new(AppState::new(config, memory_store().await))
}

//! Storage layer for the tracker
//!
//! Records live in spreadsheet-shaped tables: a header row followed by data
//! rows. [`SheetStore`] is the capability set the record store needs; the
//! backends here implement it in memory or as CSV files on disk.

/// CSV file tables
pub mod csv_files;
/// In-process tables
pub mod memory;

pub use csv_files::CsvSheetStore;
pub use memory::MemorySheetStore;

use crate::config::StorageConfig;
use crate::core::cell::Row;
use crate::utils::error::{Result, TrackerError};
use std::sync::Arc;
use tracing::info;

/// Tabular backing store.
///
/// Row indices are 0-based and include the header row at index 0.
#[async_trait::async_trait]
pub trait SheetStore: Send + Sync {
    /// Create the table if missing and make sure its first row is `header`
    async fn ensure_table(&self, table: &str, header: &Row) -> Result<()>;

    /// Every row of the table, header included
    async fn read_rows(&self, table: &str) -> Result<Vec<Row>>;

    /// Append rows after the last row
    async fn append_rows(&self, table: &str, rows: Vec<Row>) -> Result<()>;

    /// Replace the row at `index`
    async fn overwrite_row(&self, table: &str, index: usize, row: Row) -> Result<()>;

    /// Remove the row at `index`, shifting later rows up
    async fn delete_row(&self, table: &str, index: usize) -> Result<()>;

    /// Drop every data row, keeping the header
    async fn clear_data(&self, table: &str) -> Result<()>;

    /// Backend name for logs and health output
    fn backend_name(&self) -> &'static str;
}

/// Open the backend selected by configuration
pub async fn open(config: &StorageConfig) -> Result<Arc<dyn SheetStore>> {
    info!("Initializing storage backend: {}", config.backend);

    match config.backend.as_str() {
        "memory" => Ok(Arc::new(MemorySheetStore::new())),
        "csv" => Ok(Arc::new(CsvSheetStore::new(&config.data_dir).await?)),
        other => Err(TrackerError::Config(format!(
            "Unsupported storage backend: {}",
            other
        ))),
    }
}

/// Reject row indices that would touch the header or run past the end
pub(crate) fn check_data_index(table: &str, index: usize, len: usize) -> Result<()> {
    if index == 0 || index >= len {
        return Err(TrackerError::storage(format!(
            "Row {} out of range for table {} ({} rows)",
            index, table, len
        )));
    }
    Ok(())
}

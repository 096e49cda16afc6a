//! In-process table storage

use super::{SheetStore, check_data_index};
use crate::core::cell::Row;
use crate::utils::error::{Result, TrackerError};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Tables kept in memory; contents are lost when the process exits
#[derive(Debug, Default)]
pub struct MemorySheetStore {
    tables: RwLock<HashMap<String, Vec<Row>>>,
}

impl MemorySheetStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against the rows of an existing table
    fn with_table<T>(&self, table: &str, f: impl FnOnce(&mut Vec<Row>) -> Result<T>) -> Result<T> {
        let mut tables = self.tables.write();
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| TrackerError::storage(format!("Table not found: {}", table)))?;
        f(rows)
    }
}

#[async_trait::async_trait]
impl SheetStore for MemorySheetStore {
    async fn ensure_table(&self, table: &str, header: &Row) -> Result<()> {
        let mut tables = self.tables.write();
        let rows = tables.entry(table.to_string()).or_default();

        match rows.first() {
            None => {
                debug!("Creating table {}", table);
                rows.push(header.clone());
            }
            Some(existing) if existing != header => {
                warn!("Table {} keeps its existing header row", table);
            }
            Some(_) => {}
        }
        Ok(())
    }

    async fn read_rows(&self, table: &str) -> Result<Vec<Row>> {
        self.tables
            .read()
            .get(table)
            .cloned()
            .ok_or_else(|| TrackerError::storage(format!("Table not found: {}", table)))
    }

    async fn append_rows(&self, table: &str, new_rows: Vec<Row>) -> Result<()> {
        self.with_table(table, |rows| {
            rows.extend(new_rows);
            Ok(())
        })
    }

    async fn overwrite_row(&self, table: &str, index: usize, row: Row) -> Result<()> {
        self.with_table(table, |rows| {
            check_data_index(table, index, rows.len())?;
            rows[index] = row;
            Ok(())
        })
    }

    async fn delete_row(&self, table: &str, index: usize) -> Result<()> {
        self.with_table(table, |rows| {
            check_data_index(table, index, rows.len())?;
            rows.remove(index);
            Ok(())
        })
    }

    async fn clear_data(&self, table: &str) -> Result<()> {
        self.with_table(table, |rows| {
            rows.truncate(1);
            Ok(())
        })
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

//! CSV file table storage
//!
//! Each table is one `<table>.csv` file under the data directory. Cells are
//! written as text, so values come back exactly as a spreadsheet export
//! would hand them over and are typed again by the cell decode rule.

use super::{SheetStore, check_data_index};
use crate::core::cell::{CellValue, Row};
use crate::utils::error::{Result, TrackerError};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Directory of CSV tables
#[derive(Debug)]
pub struct CsvSheetStore {
    base_path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvSheetStore {
    /// Create a store rooted at `base_path`, creating the directory if needed
    pub async fn new(base_path: impl AsRef<Path>) -> Result<Self> {
        let path = base_path.as_ref().to_path_buf();

        if !path.exists() {
            fs::create_dir_all(&path).await.map_err(|e| {
                TrackerError::storage(format!("Failed to create data directory: {}", e))
            })?;
        }

        info!("CSV table storage initialized at: {}", path.display());
        Ok(Self {
            base_path: path,
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the file backing `table`
    pub fn table_path(&self, table: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", table))
    }

    async fn load(&self, table: &str) -> Result<Vec<Row>> {
        let path = self.table_path(table);
        if !path.exists() {
            return Err(TrackerError::storage(format!("Table not found: {}", table)));
        }

        let bytes = fs::read(&path).await.map_err(|e| {
            TrackerError::storage(format!("Failed to read {}: {}", path.display(), e))
        })?;
        parse_rows(&bytes)
    }

    async fn save(&self, table: &str, rows: &[Row]) -> Result<()> {
        let path = self.table_path(table);
        let tmp_path = path.with_extension("csv.tmp");
        let bytes = render_rows(rows)?;

        fs::write(&tmp_path, bytes).await.map_err(|e| {
            TrackerError::storage(format!("Failed to write {}: {}", tmp_path.display(), e))
        })?;
        fs::rename(&tmp_path, &path).await.map_err(|e| {
            TrackerError::storage(format!("Failed to replace {}: {}", path.display(), e))
        })?;

        debug!("Saved {} rows to {}", rows.len(), path.display());
        Ok(())
    }

    /// Load, mutate and save one table under the write lock
    async fn modify(&self, table: &str, f: impl FnOnce(&mut Vec<Row>) -> Result<()>) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut rows = self.load(table).await?;
        f(&mut rows)?;
        self.save(table, &rows).await
    }
}

fn parse_rows(bytes: &[u8]) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }
    Ok(rows)
}

fn render_rows(rows: &[Row]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    for row in rows {
        writer.write_record(row.iter().map(CellValue::to_text))?;
    }

    writer
        .into_inner()
        .map_err(|e| TrackerError::storage(format!("Failed to flush CSV: {}", e)))
}

#[async_trait::async_trait]
impl SheetStore for CsvSheetStore {
    async fn ensure_table(&self, table: &str, header: &Row) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let path = self.table_path(table);

        if !path.exists() {
            info!("Creating table file {}", path.display());
            return self.save(table, std::slice::from_ref(header)).await;
        }

        let mut rows = self.load(table).await?;
        match rows.first() {
            None => {
                rows.push(header.clone());
                self.save(table, &rows).await
            }
            Some(existing) if existing != header => {
                warn!("Table {} keeps its existing header row", table);
                Ok(())
            }
            Some(_) => Ok(()),
        }
    }

    async fn read_rows(&self, table: &str) -> Result<Vec<Row>> {
        self.load(table).await
    }

    async fn append_rows(&self, table: &str, new_rows: Vec<Row>) -> Result<()> {
        self.modify(table, |rows| {
            rows.extend(new_rows);
            Ok(())
        })
        .await
    }

    async fn overwrite_row(&self, table: &str, index: usize, row: Row) -> Result<()> {
        self.modify(table, |rows| {
            check_data_index(table, index, rows.len())?;
            rows[index] = row;
            Ok(())
        })
        .await
    }

    async fn delete_row(&self, table: &str, index: usize) -> Result<()> {
        self.modify(table, |rows| {
            check_data_index(table, index, rows.len())?;
            rows.remove(index);
            Ok(())
        })
        .await
    }

    async fn clear_data(&self, table: &str) -> Result<()> {
        self.modify(table, |rows| {
            rows.truncate(1);
            Ok(())
        })
        .await
    }

    fn backend_name(&self) -> &'static str {
        "csv"
    }
}

//! Record store over the sheet storage
//!
//! Translates collection operations (list, add, update, delete, cascade
//! delete, bulk replace) into reads and writes on the two tables. Each
//! operation is a full read of the table, a scan, and a targeted write.
//!
//! The HTTP server runs several workers, so operations are serialized here
//! with a single lock spanning both tables: a scan and the write that
//! follows it must not interleave with another request.

use crate::core::models::{
    Batch, Log, Record, UpdateMiss, column_index, decode_table, normalize_key, row_key,
};
use crate::core::seed;
use crate::storage::SheetStore;
use crate::utils::error::{Result, TrackerError};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Behavior switches of the record store
#[derive(Debug, Clone, Copy)]
pub struct StoreOptions {
    /// Reject writes that would store an id twice
    pub unique_ids: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self { unique_ids: true }
    }
}

/// Both collections, as returned by a full listing
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Collections {
    pub batches: Vec<Batch>,
    pub logs: Vec<Log>,
}

/// Result of an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// An existing row was overwritten
    Replaced,
    /// No row matched and the record was appended
    Inserted,
}

/// Result of deleting a batch and its logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadeSummary {
    pub batch_removed: bool,
    pub logs_removed: usize,
}

/// Record store adapter
pub struct RecordStore {
    sheets: Arc<dyn SheetStore>,
    options: StoreOptions,
    lock: Mutex<()>,
}

impl RecordStore {
    /// Wrap a sheet store and make sure both tables carry their headers
    pub async fn open(sheets: Arc<dyn SheetStore>, options: StoreOptions) -> Result<Self> {
        sheets.ensure_table(Batch::TABLE, &Batch::header()).await?;
        sheets.ensure_table(Log::TABLE, &Log::header()).await?;

        info!(
            "Record store ready on {} backend (unique ids: {})",
            sheets.backend_name(),
            options.unique_ids
        );

        Ok(Self {
            sheets,
            options,
            lock: Mutex::new(()),
        })
    }

    /// Backend name of the underlying sheet store
    pub fn backend_name(&self) -> &'static str {
        self.sheets.backend_name()
    }

    /// Every batch and every log
    pub async fn list_all(&self) -> Result<Collections> {
        let _guard = self.lock.lock().await;
        Ok(Collections {
            batches: self.read::<Batch>().await?,
            logs: self.read::<Log>().await?,
        })
    }

    /// Every record of one collection
    pub async fn list<R: Record>(&self) -> Result<Vec<R>> {
        let _guard = self.lock.lock().await;
        self.read::<R>().await
    }

    /// Append a record as a new row
    pub async fn add<R: Record>(&self, record: R) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.add_unlocked(record).await
    }

    /// Overwrite the first row carrying the record id.
    ///
    /// When nothing matches, batches are appended and logs are reported
    /// as not found.
    pub async fn update<R: Record>(&self, record: R) -> Result<UpdateOutcome> {
        let _guard = self.lock.lock().await;
        let key = validated_key(&record)?;

        let rows = self.sheets.read_rows(R::TABLE).await?;
        let found = rows
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, row)| row_key(row, 0) == key)
            .map(|(index, _)| index);

        match (found, R::UPDATE_MISS) {
            (Some(index), _) => {
                self.sheets
                    .overwrite_row(R::TABLE, index, record.to_row())
                    .await?;
                debug!("Updated {} {} at row {}", R::KIND, key, index);
                Ok(UpdateOutcome::Replaced)
            }
            (None, UpdateMiss::Insert) => {
                debug!("{} {} not found, appending", R::KIND, key);
                self.sheets
                    .append_rows(R::TABLE, vec![record.to_row()])
                    .await?;
                Ok(UpdateOutcome::Inserted)
            }
            (None, UpdateMiss::Fail) => Err(TrackerError::not_found(format!(
                "{} not found",
                R::KIND
            ))),
        }
    }

    /// Remove the last row carrying `id`; a missing id is not an error
    pub async fn delete<R: Record>(&self, id: &str) -> Result<bool> {
        let _guard = self.lock.lock().await;
        self.delete_unlocked::<R>(id).await
    }

    /// Remove a batch and every log that references it
    pub async fn delete_batch_cascade(&self, batch_id: &str) -> Result<CascadeSummary> {
        let _guard = self.lock.lock().await;

        let batch_removed = self.delete_unlocked::<Batch>(batch_id).await?;

        let key = normalize_key(batch_id);
        let column = column_index::<Log>("batchId")
            .ok_or_else(|| TrackerError::internal("Log layout lacks a batchId column"))?;

        // bottom-up, so removals never shift a row that is still to be checked
        let rows = self.sheets.read_rows(Log::TABLE).await?;
        let mut logs_removed = 0;
        for index in (1..rows.len()).rev() {
            if row_key(&rows[index], column) == key {
                self.sheets.delete_row(Log::TABLE, index).await?;
                logs_removed += 1;
            }
        }

        info!(
            "Deleted batch {} (found: {}) and {} logs",
            batch_id, batch_removed, logs_removed
        );
        Ok(CascadeSummary {
            batch_removed,
            logs_removed,
        })
    }

    /// Clear a collection and write `records` in order
    pub async fn replace_all<R: Record>(&self, records: Vec<R>) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.check_batch_of::<R>(&records)?;
        self.replace_unlocked(records).await
    }

    /// Replace both collections; both lists are checked before either
    /// table is touched. An absent list clears its table.
    pub async fn save_all(&self, batches: Vec<Batch>, logs: Vec<Log>) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.check_batch_of::<Batch>(&batches)?;
        self.check_batch_of::<Log>(&logs)?;

        self.replace_unlocked(batches).await?;
        self.replace_unlocked(logs).await
    }

    /// Replace the batch table with the default batch set; logs are kept
    pub async fn seed_defaults(&self) -> Result<usize> {
        let batches = seed::default_batches();
        let count = batches.len();
        self.replace_all(batches).await?;
        info!("Seeded {} default batches", count);
        Ok(count)
    }

    async fn read<R: Record>(&self) -> Result<Vec<R>> {
        let rows = self.sheets.read_rows(R::TABLE).await?;
        Ok(decode_table(rows))
    }

    async fn add_unlocked<R: Record>(&self, record: R) -> Result<()> {
        let key = validated_key(&record)?;

        if self.options.unique_ids {
            let rows = self.sheets.read_rows(R::TABLE).await?;
            if rows.iter().skip(1).any(|row| row_key(row, 0) == key) {
                return Err(TrackerError::conflict(format!(
                    "{} with id {} already exists",
                    R::KIND,
                    key
                )));
            }
        }

        self.sheets
            .append_rows(R::TABLE, vec![record.to_row()])
            .await?;
        debug!("Added {} {}", R::KIND, key);
        Ok(())
    }

    async fn delete_unlocked<R: Record>(&self, id: &str) -> Result<bool> {
        let key = normalize_key(id);
        let rows = self.sheets.read_rows(R::TABLE).await?;

        let found = (1..rows.len()).rev().find(|&index| row_key(&rows[index], 0) == key);
        match found {
            Some(index) => {
                self.sheets.delete_row(R::TABLE, index).await?;
                debug!("Deleted {} {} at row {}", R::KIND, key, index);
                Ok(true)
            }
            None => {
                debug!("{} {} not present, nothing to delete", R::KIND, key);
                Ok(false)
            }
        }
    }

    async fn replace_unlocked<R: Record>(&self, records: Vec<R>) -> Result<()> {
        self.sheets.clear_data(R::TABLE).await?;

        let count = records.len();
        if count > 0 {
            let rows = records.iter().map(Record::to_row).collect();
            self.sheets.append_rows(R::TABLE, rows).await?;
        }

        info!("Replaced {} table with {} rows", R::TABLE, count);
        Ok(())
    }

    /// Ids present, and unique when required
    fn check_batch_of<R: Record>(&self, records: &[R]) -> Result<()> {
        let mut seen = HashSet::new();
        for record in records {
            let key = validated_key(record)?;
            if self.options.unique_ids && !seen.insert(key.clone()) {
                return Err(TrackerError::conflict(format!(
                    "Duplicate {} id {} in submitted list",
                    R::KIND,
                    key
                )));
            }
        }
        Ok(())
    }
}

fn validated_key<R: Record>(record: &R) -> Result<String> {
    if record.id().trim().is_empty() {
        return Err(TrackerError::validation(format!("{} id is required", R::KIND)));
    }
    Ok(normalize_key(record.id()))
}

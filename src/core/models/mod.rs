//! Record types stored in the tables
//!
//! Both collections share the [`Record`] contract: a fixed column layout, a
//! row encoding with defaults applied, and a decoding from header-keyed cells.

pub mod batch;
pub mod lenient;
pub mod log;

pub use batch::{Batch, BatchStatus};
pub use log::{FrameMark, Log};

use crate::core::cell::{CellValue, Row, decode_cell};
use std::collections::HashMap;

/// What `update` does when no row carries the record id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMiss {
    /// Append the record as a new row
    Insert,
    /// Report the record as not found
    Fail,
}

/// A record persisted as one table row
pub trait Record: Clone + Send + Sync + 'static {
    /// Human readable kind, used in messages
    const KIND: &'static str;
    /// Table name in the backing store
    const TABLE: &'static str;
    /// Column names, in storage order; also the header row
    const COLUMNS: &'static [&'static str];
    /// Behavior of `update` for an unknown id
    const UPDATE_MISS: UpdateMiss;

    /// Record key
    fn id(&self) -> &str;

    /// Encode into a full row, defaults applied
    fn to_row(&self) -> Row;

    /// Build from decoded header-keyed cells
    fn from_fields(fields: &Fields) -> Self;

    /// Header row cells
    fn header() -> Row {
        Self::COLUMNS.iter().map(|c| CellValue::from(*c)).collect()
    }
}

/// Decoded cells of one row, keyed by header name
#[derive(Debug, Clone, Default)]
pub struct Fields {
    values: HashMap<String, CellValue>,
}

impl Fields {
    /// Pair a raw row with the header, decoding every cell
    pub fn new(header: &[CellValue], row: Row) -> Self {
        let values = header
            .iter()
            .map(CellValue::to_text)
            .zip(row.into_iter().map(decode_cell))
            .collect();
        Self { values }
    }

    /// Cell under `name`, blank when the column is missing
    pub fn cell(&self, name: &str) -> &CellValue {
        self.values.get(name).unwrap_or(&CellValue::Empty)
    }

    pub fn text(&self, name: &str) -> String {
        self.cell(name).to_text()
    }

    pub fn int(&self, name: &str) -> i64 {
        self.cell(name).to_i64()
    }

    pub fn count(&self, name: &str) -> u64 {
        self.int(name).max(0) as u64
    }

    pub fn flag(&self, name: &str) -> bool {
        self.cell(name).to_bool()
    }

    /// True when the id column is blank
    pub fn lacks_id(&self) -> bool {
        self.cell("id").is_blank()
    }
}

/// Decode a full table (header at index 0) into records.
///
/// Rows without an id are treated as blank and skipped.
pub fn decode_table<R: Record>(mut rows: Vec<Row>) -> Vec<R> {
    if rows.len() <= 1 {
        return Vec::new();
    }

    let data = rows.split_off(1);
    let header = &rows[0];

    data.into_iter()
        .map(|row| Fields::new(header, row))
        .filter(|fields| !fields.lacks_id())
        .map(|fields| R::from_fields(&fields))
        .collect()
}

/// Key stored in `column` of a raw row, as compared by the store
pub fn row_key(row: &Row, column: usize) -> String {
    row.get(column)
        .cloned()
        .map(decode_cell)
        .map(|cell| cell.to_text())
        .unwrap_or_default()
}

/// Key form of a submitted id; matches what [`row_key`] yields once stored
pub fn normalize_key(id: &str) -> String {
    decode_cell(CellValue::from(id)).to_text()
}

/// Position of `name` in the column layout of `R`
pub fn column_index<R: Record>(name: &str) -> Option<usize> {
    R::COLUMNS.iter().position(|column| *column == name)
}

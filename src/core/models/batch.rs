//! Annotation batch record

use super::{Fields, Record, UpdateMiss, lenient};
use crate::core::cell::{CellValue, Row};
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Lifecycle status of a batch.
///
/// Known values get their own variant; anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BatchStatus {
    #[default]
    NotStarting,
    Running,
    Completed,
    Other(String),
}

impl BatchStatus {
    /// Parse a stored or submitted status; blank means not started
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "not-starting" => BatchStatus::NotStarting,
            "running" => BatchStatus::Running,
            "completed" => BatchStatus::Completed,
            _ => BatchStatus::Other(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BatchStatus::NotStarting => "not-starting",
            BatchStatus::Running => "running",
            BatchStatus::Completed => "completed",
            BatchStatus::Other(value) => value,
        }
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BatchStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BatchStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<serde_json::Value>::deserialize(deserializer)? {
            None | Some(serde_json::Value::Null) => Ok(BatchStatus::default()),
            Some(serde_json::Value::String(value)) => Ok(BatchStatus::parse(&value)),
            Some(other) => Err(D::Error::custom(format!(
                "expected a status string, found {}",
                other
            ))),
        }
    }
}

/// A unit of annotation work over a frame range of one sensor stream
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub sensor: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_frames: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub completed: u64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub start_frame: i64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub end_frame: i64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub current_frame: i64,
    #[serde(default)]
    pub status: BatchStatus,
    #[serde(default, deserialize_with = "lenient::text")]
    pub start_date: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub delivered: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    pub delivered_date: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub paid: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    pub paid_date: String,
}

impl Batch {
    /// New batch with every other field at its default
    pub fn new(id: impl Into<String>, name: impl Into<String>, sensor: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sensor: sensor.into(),
            ..Default::default()
        }
    }
}

impl Record for Batch {
    const KIND: &'static str = "Batch";
    const TABLE: &'static str = "Batches";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "sensor",
        "totalFrames",
        "completed",
        "startFrame",
        "endFrame",
        "currentFrame",
        "status",
        "startDate",
        "delivered",
        "deliveredDate",
        "paid",
        "paidDate",
    ];
    const UPDATE_MISS: UpdateMiss = UpdateMiss::Insert;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_row(&self) -> Row {
        vec![
            CellValue::from(self.id.as_str()),
            CellValue::from(self.name.as_str()),
            CellValue::from(self.sensor.as_str()),
            CellValue::from(self.total_frames),
            CellValue::from(self.completed),
            CellValue::from(self.start_frame),
            CellValue::from(self.end_frame),
            CellValue::from(self.current_frame),
            CellValue::from(BatchStatus::parse(self.status.as_str()).as_str()),
            CellValue::from(self.start_date.as_str()),
            CellValue::from(self.delivered),
            CellValue::from(self.delivered_date.as_str()),
            CellValue::from(self.paid),
            CellValue::from(self.paid_date.as_str()),
        ]
    }

    fn from_fields(fields: &Fields) -> Self {
        Self {
            id: fields.text("id"),
            name: fields.text("name"),
            sensor: fields.text("sensor"),
            total_frames: fields.count("totalFrames"),
            completed: fields.count("completed"),
            start_frame: fields.int("startFrame"),
            end_frame: fields.int("endFrame"),
            current_frame: fields.int("currentFrame"),
            status: BatchStatus::parse(&fields.text("status")),
            start_date: fields.text("startDate"),
            delivered: fields.flag("delivered"),
            delivered_date: fields.text("deliveredDate"),
            paid: fields.flag("paid"),
            paid_date: fields.text("paidDate"),
        }
    }
}

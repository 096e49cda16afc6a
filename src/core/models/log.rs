//! Work log record

use super::{Fields, Record, UpdateMiss, lenient};
use crate::core::cell::{CellValue, Row, decode_cell};
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Default work type of a log entry
pub const DEFAULT_WORK_TYPE: &str = "production";

fn default_work_type() -> String {
    DEFAULT_WORK_TYPE.to_string()
}

fn work_type<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = lenient::text(deserializer)?;
    if value.is_empty() {
        Ok(default_work_type())
    } else {
        Ok(value)
    }
}

/// Optional frame bound on a log: blank, a frame number, or free text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FrameMark {
    #[default]
    Empty,
    Frame(i64),
    Text(String),
}

impl FrameMark {
    /// Interpret a decoded cell
    pub fn from_cell(cell: CellValue) -> Self {
        match cell {
            CellValue::Number(number) => FrameMark::Frame(number.trunc() as i64),
            cell if cell.is_blank() => FrameMark::Empty,
            cell => FrameMark::Text(cell.to_text()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FrameMark::Empty)
    }

    fn to_cell(&self) -> CellValue {
        match self {
            FrameMark::Empty => CellValue::Empty,
            FrameMark::Frame(frame) => CellValue::from(*frame),
            FrameMark::Text(text) => CellValue::from(text.as_str()),
        }
    }
}

impl From<i64> for FrameMark {
    fn from(frame: i64) -> Self {
        FrameMark::Frame(frame)
    }
}

impl Serialize for FrameMark {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FrameMark::Empty => serializer.serialize_str(""),
            FrameMark::Frame(frame) => serializer.serialize_i64(*frame),
            FrameMark::Text(text) => serializer.serialize_str(text),
        }
    }
}

// Strings go through the cell decode rule so a mark reads back the same
// way it will be listed after storage. A submitted 0 or `false` is blank.
impl<'de> Deserialize<'de> for FrameMark {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<serde_json::Value>::deserialize(deserializer)? {
            None | Some(serde_json::Value::Null) | Some(serde_json::Value::Bool(false)) => {
                Ok(FrameMark::Empty)
            }
            Some(serde_json::Value::Number(number)) => number
                .as_i64()
                .or_else(|| number.as_f64().map(|n| n.trunc() as i64))
                .map(|frame| match frame {
                    0 => FrameMark::Empty,
                    frame => FrameMark::Frame(frame),
                })
                .ok_or_else(|| D::Error::custom(format!("invalid frame {}", number))),
            Some(serde_json::Value::String(text)) => {
                Ok(FrameMark::from_cell(decode_cell(CellValue::Text(text))))
            }
            Some(other) => Err(D::Error::custom(format!(
                "expected a frame number or string, found {}",
                other
            ))),
        }
    }
}

/// Work performed against a batch by one annotator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub batch_id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub batch_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub annotator: String,
    #[serde(default = "default_work_type", deserialize_with = "work_type")]
    pub work_type: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub frames: u64,
    #[serde(default)]
    pub start_frame: FrameMark,
    #[serde(default)]
    pub end_frame: FrameMark,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            id: String::new(),
            date: String::new(),
            batch_id: String::new(),
            batch_name: String::new(),
            annotator: String::new(),
            work_type: default_work_type(),
            frames: 0,
            start_frame: FrameMark::Empty,
            end_frame: FrameMark::Empty,
        }
    }
}

impl Log {
    /// New log against `batch_id` with every other field at its default
    pub fn new(id: impl Into<String>, batch_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            batch_id: batch_id.into(),
            ..Default::default()
        }
    }
}

impl Record for Log {
    const KIND: &'static str = "Log";
    const TABLE: &'static str = "Logs";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "date",
        "batchId",
        "batchName",
        "annotator",
        "workType",
        "frames",
        "startFrame",
        "endFrame",
    ];
    const UPDATE_MISS: UpdateMiss = UpdateMiss::Fail;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_row(&self) -> Row {
        let work_type = if self.work_type.is_empty() {
            DEFAULT_WORK_TYPE
        } else {
            self.work_type.as_str()
        };

        vec![
            CellValue::from(self.id.as_str()),
            CellValue::from(self.date.as_str()),
            CellValue::from(self.batch_id.as_str()),
            CellValue::from(self.batch_name.as_str()),
            CellValue::from(self.annotator.as_str()),
            CellValue::from(work_type),
            CellValue::from(self.frames),
            self.start_frame.to_cell(),
            self.end_frame.to_cell(),
        ]
    }

    fn from_fields(fields: &Fields) -> Self {
        Self {
            id: fields.text("id"),
            date: fields.text("date"),
            batch_id: fields.text("batchId"),
            batch_name: fields.text("batchName"),
            annotator: fields.text("annotator"),
            work_type: fields.text("workType"),
            frames: fields.count("frames"),
            start_frame: FrameMark::from_cell(fields.cell("startFrame").clone()),
            end_frame: FrameMark::from_cell(fields.cell("endFrame").clone()),
        }
    }
}

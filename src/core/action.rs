//! Action dispatch
//!
//! Both HTTP entry points name an action and carry a JSON payload. This
//! module parses the action name, decodes the payload fields the action
//! needs, runs it against the [`RecordStore`] and builds the response
//! envelope.

use crate::core::models::{Batch, Log, lenient};
use crate::core::store::{Collections, RecordStore};
use crate::utils::error::{Result, TrackerError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Action used when a request names none
pub const DEFAULT_ACTION: &str = "getAll";

/// Operations reachable over HTTP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GetAll,
    AddBatch,
    UpdateBatch,
    DeleteBatch,
    AddLog,
    UpdateLog,
    DeleteLog,
    SaveAll,
}

impl Action {
    /// Wire name of the action
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::GetAll => "getAll",
            Action::AddBatch => "addBatch",
            Action::UpdateBatch => "updateBatch",
            Action::DeleteBatch => "deleteBatch",
            Action::AddLog => "addLog",
            Action::UpdateLog => "updateLog",
            Action::DeleteLog => "deleteLog",
            Action::SaveAll => "saveAll",
        }
    }

    /// Whether the action changes stored data
    pub fn is_write(&self) -> bool {
        !matches!(self, Action::GetAll)
    }
}

impl FromStr for Action {
    type Err = TrackerError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "getAll" => Ok(Action::GetAll),
            "addBatch" => Ok(Action::AddBatch),
            "updateBatch" => Ok(Action::UpdateBatch),
            "deleteBatch" => Ok(Action::DeleteBatch),
            "addLog" => Ok(Action::AddLog),
            "updateLog" => Ok(Action::UpdateLog),
            "deleteLog" => Ok(Action::DeleteLog),
            "saveAll" => Ok(Action::SaveAll),
            other => Err(TrackerError::UnknownAction(other.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request payload as sent by the client.
///
/// Fields stay raw JSON until the action asks for them, so a field the
/// action never reads cannot fail the request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    fields: Map<String, Value>,
}

#[derive(Deserialize)]
struct LenientId(#[serde(deserialize_with = "lenient::text")] String);

impl Payload {
    /// Wrap a JSON object
    pub fn from_object(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Decode the `data` query parameter; absent or blank means no payload
    pub fn from_query(data: Option<&str>) -> Result<Self> {
        match data.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(text) => match serde_json::from_str::<Value>(text)? {
                Value::Object(object) => Ok(Self::from_object(object)),
                Value::Null => Ok(Self::default()),
                _ => Err(TrackerError::bad_request("data must be a JSON object")),
            },
        }
    }

    /// Take and decode one field; absent and `null` both give `None`
    pub fn take<T: DeserializeOwned>(&mut self, name: &str) -> Result<Option<T>> {
        match self.fields.remove(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value).map(Some).map_err(|e| {
                TrackerError::bad_request(format!("invalid `{}` payload: {}", name, e))
            }),
        }
    }

    /// Take the `id` field, accepting strings or numbers
    pub fn take_id(&mut self) -> Result<String> {
        Ok(self
            .take::<LenientId>("id")?
            .map(|LenientId(id)| id)
            .unwrap_or_default())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}

/// Split a POST body into its action name and payload.
///
/// The body is one JSON object holding `action` next to the payload fields.
pub fn parse_post_body(body: &[u8]) -> Result<(String, Payload)> {
    let mut object = match serde_json::from_slice::<Value>(body)? {
        Value::Object(object) => object,
        _ => return Err(TrackerError::bad_request("request body must be a JSON object")),
    };

    let action = match object.remove("action") {
        Some(Value::String(name)) => name,
        Some(Value::Null) | None => {
            return Err(TrackerError::bad_request("request body requires an `action` field"));
        }
        Some(other) => {
            return Err(TrackerError::bad_request(format!(
                "`action` must be a string, found {}",
                other
            )));
        }
    };

    Ok((action, Payload::from_object(object)))
}

/// Response body of every request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batches: Option<Vec<Batch>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<Vec<Log>>,
}

impl Envelope {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            success: false,
            error: Some(message),
            ..Default::default()
        }
    }

    pub fn with_collections(collections: Collections) -> Self {
        Self {
            success: true,
            batches: Some(collections.batches),
            logs: Some(collections.logs),
            ..Default::default()
        }
    }
}

fn required<T: DeserializeOwned>(payload: &mut Payload, action: Action, field: &str) -> Result<T> {
    payload.take(field)?.ok_or_else(|| {
        TrackerError::bad_request(format!("{} requires a `{}` payload", action, field))
    })
}

fn required_id(payload: &mut Payload, action: Action) -> Result<String> {
    let id = payload.take_id()?;
    if id.trim().is_empty() {
        return Err(TrackerError::bad_request(format!(
            "{} requires an `id` payload",
            action
        )));
    }
    Ok(id)
}

/// Run a parsed action, decoding only the payload fields it reads
pub async fn execute(store: &RecordStore, action: Action, mut payload: Payload) -> Result<Envelope> {
    if action.is_write() {
        info!("Executing action {}", action);
    } else {
        debug!("Executing action {}", action);
    }

    match action {
        Action::GetAll => Ok(Envelope::with_collections(store.list_all().await?)),
        Action::AddBatch => {
            let batch: Batch = required(&mut payload, action, "batch")?;
            store.add(batch).await?;
            Ok(Envelope::ok())
        }
        Action::UpdateBatch => {
            let batch: Batch = required(&mut payload, action, "batch")?;
            store.update(batch).await?;
            Ok(Envelope::ok())
        }
        Action::DeleteBatch => {
            let id = required_id(&mut payload, action)?;
            store.delete_batch_cascade(&id).await?;
            Ok(Envelope::ok())
        }
        Action::AddLog => {
            let log: Log = required(&mut payload, action, "log")?;
            store.add(log).await?;
            Ok(Envelope::ok())
        }
        Action::UpdateLog => {
            let log: Log = required(&mut payload, action, "log")?;
            store.update(log).await?;
            Ok(Envelope::ok())
        }
        Action::DeleteLog => {
            let id = required_id(&mut payload, action)?;
            store.delete::<Log>(&id).await?;
            Ok(Envelope::ok())
        }
        Action::SaveAll => {
            let batches: Vec<Batch> = payload.take("batches")?.unwrap_or_default();
            let logs: Vec<Log> = payload.take("logs")?.unwrap_or_default();
            store.save_all(batches, logs).await?;
            Ok(Envelope::ok())
        }
    }
}

/// Resolve `name` and run it. Failures come back as errors so the caller
/// can fold them into a failure envelope.
pub async fn dispatch(store: &RecordStore, name: &str, payload: Payload) -> Result<Envelope> {
    let result = match name.parse::<Action>() {
        Ok(action) => execute(store, action, payload).await,
        Err(e) => Err(e),
    };

    if let Err(e) = &result {
        warn!("Action {} failed: {}", name, e);
    }
    result
}

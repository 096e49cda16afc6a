//! Utility modules for the tracker
//!
//! - **error**: crate error type and `Result` alias
//! - **logging**: tracing subscriber initialization

pub mod error;
pub mod logging;

use chrono::{SecondsFormat, Utc};

/// Current UTC time as an RFC 3339 string
pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

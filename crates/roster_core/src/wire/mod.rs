//! Wire representations of people, notes and todos.
//!
//! # Responsibility
//! - Flatten owner references to scalar ids for outgoing JSON.
//! - Turn incoming JSON into domain create-records and sparse patches.
//!
//! # Invariants
//! - Mapping is pure: nothing here touches the store.
//! - Notes/todos carry their owner as `person: <id>`; a nested person object
//!   is never emitted.
//! - Persons carry `notes`/`todos` as id lists on every endpoint.
//! - Single records are wrapped in a singular root key, lists in a plural one.
//!   Request bodies may arrive bare or wrapped in the singular key.

use crate::model::ValidationError;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub mod note;
pub mod person;
pub mod todo;

/// `0001-01-01T00:00:00Z`, the "unset" timestamp older clients send.
const ZERO_TIMESTAMP_SECS: i64 = -62_135_596_800;

/// Decodes a request body that is either bare or wrapped in `root`.
pub fn decode_body<T: DeserializeOwned>(body: &str, root: &str) -> Result<T, ValidationError> {
    let value: Value = serde_json::from_str(body).map_err(malformed)?;
    serde_json::from_value(unwrap_envelope(value, root)).map_err(malformed)
}

/// An object under `root` is the payload; sibling keys beside it are ignored.
fn unwrap_envelope(value: Value, root: &str) -> Value {
    match value {
        Value::Object(mut map) if matches!(map.get(root), Some(Value::Object(_))) => {
            map.remove(root).unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn malformed(err: serde_json::Error) -> ValidationError {
    ValidationError::MalformedBody(err.to_string())
}

/// Treats the zero timestamp as "no date".
pub(crate) fn normalize_date(date: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    date.filter(|value| {
        !(value.timestamp() == ZERO_TIMESTAMP_SECS && value.timestamp_subsec_nanos() == 0)
    })
}

/// `Some` only for present, non-empty strings.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

/// Positive ids only; `0` is the "unset" id.
pub(crate) fn positive_id(value: Option<i64>) -> Option<i64> {
    value.filter(|id| *id > 0)
}

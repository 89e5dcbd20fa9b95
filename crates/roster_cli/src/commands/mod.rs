pub mod notes;
pub mod people;
pub mod seed;
pub mod todos;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Builds a JSON object from the fields that were actually given.
pub(crate) fn body(fields: Vec<(&str, Option<Value>)>) -> String {
    let object: Map<String, Value> = fields
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key.to_string(), value)))
        .collect();
    Value::Object(object).to_string()
}

pub(crate) fn text(value: Option<String>) -> Option<Value> {
    value.map(Value::String)
}

pub(crate) fn id(value: Option<i64>) -> Option<Value> {
    value.map(Value::from)
}

pub(crate) fn date(value: Option<DateTime<Utc>>) -> Option<Value> {
    value.map(|date| Value::String(date.to_rfc3339()))
}

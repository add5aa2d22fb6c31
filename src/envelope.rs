//! The `{response, status}` wrapper shared by every JSON response.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Result, TaleoError};
use crate::relationship::ResourceKind;

/// Raw response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    pub response: Value,
    pub status: Status,
}

/// Envelope status block.
#[derive(Debug, Deserialize)]
pub(crate) struct Status {
    pub success: bool,
    #[serde(default)]
    pub detail: Value,
}

impl Envelope {
    /// Unwrap the payload, turning `success == false` into an API error.
    pub fn into_payload(self, status_code: Option<u16>) -> Result<Value> {
        if !self.status.success {
            return Err(TaleoError::ApiError {
                detail: self.status.detail,
                status_code,
            });
        }
        Ok(self.response)
    }
}

/// Take the object stored under `key` in a payload.
pub(crate) fn take_object(payload: &mut Value, key: &str) -> Result<Map<String, Value>> {
    match payload.get_mut(key).map(Value::take) {
        Some(Value::Object(map)) => Ok(map),
        Some(other) => Err(TaleoError::MalformedResponse(format!(
            "expected an object under '{key}', found {other}"
        ))),
        None => Err(TaleoError::MalformedResponse(format!(
            "response has no '{key}' entry"
        ))),
    }
}

/// Take the array stored under `key` in a payload.
pub(crate) fn take_array(payload: &mut Value, key: &str) -> Result<Vec<Value>> {
    match payload.get_mut(key).map(Value::take) {
        Some(Value::Array(items)) => Ok(items),
        Some(Value::Null) => Ok(Vec::new()),
        Some(other) => Err(TaleoError::MalformedResponse(format!(
            "expected an array under '{key}', found {other}"
        ))),
        None => Err(TaleoError::MalformedResponse(format!(
            "response has no '{key}' collection"
        ))),
    }
}

/// Attributes of one collection element.
///
/// Elements come either bare or wrapped as `{<kind>: {...}}`.
pub(crate) fn entity_attributes(kind: &ResourceKind, item: Value) -> Result<Map<String, Value>> {
    match item {
        Value::Object(map) => {
            let wrapped = map.len() == 1 && map.get(kind.name).is_some_and(Value::is_object);
            if wrapped {
                take_object(&mut Value::Object(map), kind.name)
            } else {
                Ok(map)
            }
        }
        other => Err(TaleoError::MalformedResponse(format!(
            "expected a {} object, found {other}",
            kind.name
        ))),
    }
}

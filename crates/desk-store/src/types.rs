//! Wire types and extended-JSON handling for the Data API.
//!
//! The Data API speaks extended JSON: document identifiers travel as
//! `{"$oid": "..."}` wrappers. Models on our side use plain string ids, so
//! filters wrap ids on the way out and responses are normalized on the way in.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use desk_models::ObjectId;

/// Result of an `insertOne` action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertedId {
    pub inserted_id: String,
}

/// Result of an `updateOne` action. A filter that matched nothing reports
/// `matched_count == 0`; that is the caller's to interpret, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReport {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Extended-JSON identifier wrapper for filters.
pub fn oid(id: &ObjectId) -> Value {
    json!({ "$oid": id.as_str() })
}

/// Collapse `{"$oid": "..."}` wrappers in a response value to plain strings.
///
/// Only identifier wrappers are touched; other extended-JSON forms (dates,
/// decimals) are left for serde to reject or the caller to pass through.
pub fn normalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            if let Some(inner) = as_oid(&map) {
                return Value::String(inner);
            }
            Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, normalize(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        other => other,
    }
}

fn as_oid(map: &Map<String, Value>) -> Option<String> {
    if map.len() != 1 {
        return None;
    }
    map.get("$oid").and_then(Value::as_str).map(str::to_string)
}

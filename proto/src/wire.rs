//! JSON wire form of a [`Delta`]:
//!
//! ```json
//! { "action": "create" | "modify" | "delete" | "deleteAll",
//!   "<objectId>": { "type": <kind code>, ...kind-specific fields... },
//!   "timestamp": <i64 milliseconds> }
//! ```
//!
//! Exactly one key besides `action`/`timestamp` is present and it names the
//! object; `deleteAll` carries neither the object entry nor a timestamp.

use serde_json::{Map, Value};

use crate::delta::Delta;
use crate::error::DecodeError;
use crate::id::ObjectId;
use crate::record::ShapeKind;

/// Encode a delta into its wire object. The payload's `type` field is
/// stamped with the record's kind code so the two can never disagree.
pub fn encode(delta: &Delta) -> Value {
    let mut wire = Map::new();
    wire.insert("action".to_string(), Value::from(delta.action()));

    match delta {
        Delta::Create { id, kind, payload, timestamp } | Delta::Modify { id, kind, payload, timestamp } => {
            let mut body = payload.as_object().cloned().unwrap_or_default();
            body.insert("type".to_string(), Value::from(kind.code()));
            wire.insert(id.to_string(), Value::Object(body));
            wire.insert("timestamp".to_string(), Value::from(*timestamp));
        }
        Delta::Delete { id } => {
            wire.insert(id.to_string(), Value::Object(Map::new()));
        }
        Delta::ClearAll => {}
    }

    Value::Object(wire)
}

pub fn to_bytes(delta: &Delta) -> Vec<u8> {
    // Serializing a Value with string keys cannot fail
    serde_json::to_vec(&encode(delta)).expect("delta wire object is always serializable")
}

/// Decode a wire object back into a delta. Anything malformed rejects the
/// delta as a whole; nothing is ever partially decoded.
pub fn decode(value: &Value) -> Result<Delta, DecodeError> {
    let wire = value.as_object().ok_or(DecodeError::NotAnObject)?;
    let action = wire.get("action").and_then(Value::as_str).ok_or(DecodeError::MissingAction)?;

    match action {
        "deleteAll" => return Ok(Delta::ClearAll),
        "create" | "modify" | "delete" => {}
        other => return Err(DecodeError::UnknownAction(other.to_string())),
    }

    let (id, body) = wire
        .iter()
        .find(|(key, _)| key.as_str() != "action" && key.as_str() != "timestamp")
        .ok_or(DecodeError::MissingObjectEntry)?;
    let id = ObjectId::from(id.as_str());

    // A delete names its target; any payload or timestamp sent along with
    // it is ignored.
    if action == "delete" {
        return Ok(Delta::Delete { id });
    }

    let body = body.as_object().ok_or_else(|| DecodeError::PayloadNotAnObject(id.to_string()))?;
    let timestamp = wire.get("timestamp").and_then(Value::as_i64).ok_or(DecodeError::MissingTimestamp)?;
    let code = body.get("type").and_then(Value::as_i64).ok_or(DecodeError::MissingKind)?;
    let kind = ShapeKind::try_from(code)?;
    let payload = Value::Object(body.clone());

    Ok(match action {
        "create" => Delta::Create { id, kind, payload, timestamp },
        _ => Delta::Modify { id, kind, payload, timestamp },
    })
}

pub fn from_bytes(bytes: &[u8]) -> Result<Delta, DecodeError> {
    let value: Value = serde_json::from_slice(bytes)?;
    decode(&value)
}

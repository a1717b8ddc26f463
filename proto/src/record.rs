use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DecodeError;
use crate::id::ObjectId;

/// Shape variant tag. Immutable for the lifetime of an object: a kind
/// change is expressed as a delete plus a create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Line = 1,
    Polyline = 2,
    Rectangle = 3,
    AssistCircle = 4,
}

impl ShapeKind {
    /// Integer code carried in the wire payload's `type` field.
    pub fn code(&self) -> i64 { *self as i64 }
}

impl TryFrom<i64> for ShapeKind {
    type Error = DecodeError;
    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(ShapeKind::Line),
            2 => Ok(ShapeKind::Polyline),
            3 => Ok(ShapeKind::Rectangle),
            4 => Ok(ShapeKind::AssistCircle),
            other => Err(DecodeError::UnknownKind(other)),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Line => write!(f, "line"),
            ShapeKind::Polyline => write!(f, "polyline"),
            ShapeKind::Rectangle => write!(f, "rectangle"),
            ShapeKind::AssistCircle => write!(f, "assist-circle"),
        }
    }
}

/// One shape's replicated state. The payload is opaque to the replication
/// core, which only ever compares ids and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub id: ObjectId,
    pub kind: ShapeKind,
    pub payload: Value,
    /// Milliseconds; the sole conflict-resolution key. Each successive
    /// mutation by the same author must carry a larger value.
    pub timestamp: i64,
}

impl ObjectRecord {
    pub fn new(id: ObjectId, kind: ShapeKind, payload: Value, timestamp: i64) -> Self {
        Self { id, kind, payload, timestamp }
    }
}

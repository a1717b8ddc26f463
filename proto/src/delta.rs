use std::fmt;

use serde_json::Value;

use crate::id::ObjectId;
use crate::record::{ObjectRecord, ShapeKind};

/// One self-contained state change to the shared object set, the unit of
/// propagation between replicas and of store mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Delta {
    Create { id: ObjectId, kind: ShapeKind, payload: Value, timestamp: i64 },
    Modify { id: ObjectId, kind: ShapeKind, payload: Value, timestamp: i64 },
    Delete { id: ObjectId },
    ClearAll,
}

impl Delta {
    pub fn create(record: &ObjectRecord) -> Self {
        Delta::Create {
            id: record.id.clone(),
            kind: record.kind,
            payload: record.payload.clone(),
            timestamp: record.timestamp,
        }
    }

    pub fn modify(record: &ObjectRecord) -> Self {
        Delta::Modify {
            id: record.id.clone(),
            kind: record.kind,
            payload: record.payload.clone(),
            timestamp: record.timestamp,
        }
    }

    pub fn delete(id: ObjectId) -> Self { Delta::Delete { id } }

    /// Wire action tag.
    pub fn action(&self) -> &'static str {
        match self {
            Delta::Create { .. } => "create",
            Delta::Modify { .. } => "modify",
            Delta::Delete { .. } => "delete",
            Delta::ClearAll => "deleteAll",
        }
    }

    /// The targeted object, if the action targets one.
    pub fn object_id(&self) -> Option<&ObjectId> {
        match self {
            Delta::Create { id, .. } | Delta::Modify { id, .. } | Delta::Delete { id } => Some(id),
            Delta::ClearAll => None,
        }
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.object_id() {
            Some(id) => write!(f, "{} {}", self.action(), id),
            None => write!(f, "{}", self.action()),
        }
    }
}

use serde_json::Value;

use slate_proto::{Delta, ObjectId, ObjectRecord, ShapeKind};

/// Ordered contents of the store at a point in time. Order is insertion
/// order, which the renderer treats as z-order.
pub type Snapshot = Vec<ObjectRecord>;

/// Per-object notification published after each successful apply, carrying
/// the delta's essential fields. Together with the snapshot publication this
/// lets a consumer choose between incremental patching and full re-sync.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardChange {
    Created { id: ObjectId, kind: ShapeKind, payload: Value, timestamp: i64 },
    Modified { id: ObjectId, kind: ShapeKind, payload: Value, timestamp: i64 },
    Deleted { id: ObjectId },
    Cleared,
}

impl BoardChange {
    pub fn object_id(&self) -> Option<&ObjectId> {
        match self {
            BoardChange::Created { id, .. } | BoardChange::Modified { id, .. } | BoardChange::Deleted { id } => Some(id),
            BoardChange::Cleared => None,
        }
    }
}

impl From<&Delta> for BoardChange {
    fn from(delta: &Delta) -> Self {
        match delta {
            Delta::Create { id, kind, payload, timestamp } => BoardChange::Created {
                id: id.clone(),
                kind: *kind,
                payload: payload.clone(),
                timestamp: *timestamp,
            },
            Delta::Modify { id, kind, payload, timestamp } => BoardChange::Modified {
                id: id.clone(),
                kind: *kind,
                payload: payload.clone(),
                timestamp: *timestamp,
            },
            Delta::Delete { id } => BoardChange::Deleted { id: id.clone() },
            Delta::ClearAll => BoardChange::Cleared,
        }
    }
}

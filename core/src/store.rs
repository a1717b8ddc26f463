use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;
use tracing::{debug, warn};

use slate_proto::{Delta, ObjectId, ObjectRecord, ShapeKind};

use crate::broadcast::{Broadcast, IntoListener, ListenerGuard};
use crate::changes::{BoardChange, Snapshot};
use crate::error::DeltaError;

/// Result of offering one delta to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The delta took effect and was published to observers.
    Applied,
    /// Create for an id already present. A protocol violation by the
    /// sender; the existing record is kept.
    DuplicateCreate,
    /// Modify or delete for an id not present. A violation for modify,
    /// expected duplicate-delivery noise for delete.
    UnknownId,
    /// Modify losing the last-writer-wins comparison. Expected under
    /// concurrent editing.
    Stale,
    /// Malformed input dropped before reaching the board.
    Rejected,
}

impl ApplyOutcome {
    pub fn applied(&self) -> bool { matches!(self, ApplyOutcome::Applied) }
}

/// Local mutation intent, input to [`Store::generate_delta`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Modify,
    Delete,
    ClearAll,
}

#[derive(Default)]
struct BoardState {
    /// Insertion-ordered records; position is render depth.
    objects: Vec<ObjectRecord>,
    /// id -> position in `objects`. Kept in exact agreement with the
    /// sequence by every mutation.
    index: HashMap<ObjectId, usize>,
}

/// The authoritative local view of the shared drawing.
///
/// Applies one delta at a time with deterministic, order-tolerant conflict
/// resolution, and is the single source of truth queried for rendering.
/// The sequence and its index are guarded as one unit; observers are
/// notified after the lock is released, from a copy taken inside it, so
/// they never see a half-applied state.
pub struct Store {
    state: Mutex<BoardState>,
    changes: Broadcast<BoardChange>,
    snapshots: Broadcast<Snapshot>,
}

impl Store {
    pub fn new() -> Self {
        Self { state: Mutex::new(BoardState::default()), changes: Broadcast::new(), snapshots: Broadcast::new() }
    }

    /// Applies a delta. The whole read-check-write sequence runs in one
    /// exclusive critical section; either the delta takes effect entirely
    /// or the state is untouched.
    pub fn apply(&self, delta: &Delta) -> ApplyOutcome {
        let snapshot = {
            let mut state = self.state.lock().unwrap();
            let outcome = state.apply(delta);
            if !outcome.applied() {
                return outcome;
            }
            state.objects.clone()
        };

        self.changes.send(BoardChange::from(delta));
        self.snapshots.send(snapshot);
        ApplyOutcome::Applied
    }

    /// Consistent copy of the current state.
    pub fn snapshot(&self) -> Snapshot { self.state.lock().unwrap().objects.clone() }

    pub fn get(&self, id: &ObjectId) -> Option<ObjectRecord> {
        let state = self.state.lock().unwrap();
        state.index.get(id).map(|&position| state.objects[position].clone())
    }

    pub fn len(&self) -> usize { self.state.lock().unwrap().objects.len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Re-publishes the current snapshot without a preceding mutation.
    /// Used by the session so every inbound delta answers with state,
    /// applied or not.
    pub fn publish_snapshot(&self) {
        let snapshot = self.snapshot();
        self.snapshots.send(snapshot);
    }

    /// Packages a local mutation intent into a delta. Pure; the caller
    /// supplies the record (which carries the timestamp) for everything
    /// but `ClearAll`.
    pub fn generate_delta(operation: Operation, record: Option<&ObjectRecord>) -> Result<Delta, DeltaError> {
        if operation == Operation::ClearAll {
            return Ok(Delta::ClearAll);
        }
        let record = record.ok_or(DeltaError::MissingRecord(operation))?;
        Ok(match operation {
            Operation::Create => Delta::create(record),
            Operation::Modify => Delta::modify(record),
            _ => Delta::delete(record.id.clone()),
        })
    }

    /// Register for per-object change events.
    pub fn on_change<L>(&self, listener: L) -> ListenerGuard<BoardChange>
    where L: IntoListener<BoardChange> {
        self.changes.listen(listener)
    }

    /// Register for full-snapshot publication.
    pub fn on_snapshot<L>(&self, listener: L) -> ListenerGuard<Snapshot>
    where L: IntoListener<Snapshot> {
        self.snapshots.listen(listener)
    }

    #[cfg(test)]
    fn assert_index_consistent(&self) {
        let state = self.state.lock().unwrap();
        assert_eq!(state.index.len(), state.objects.len());
        for (position, record) in state.objects.iter().enumerate() {
            assert_eq!(state.index.get(&record.id), Some(&position), "index disagrees for {}", record.id);
        }
    }
}

impl Default for Store {
    fn default() -> Self { Self::new() }
}

impl BoardState {
    fn apply(&mut self, delta: &Delta) -> ApplyOutcome {
        match delta {
            Delta::Create { id, kind, payload, timestamp } => self.create(id, *kind, payload, *timestamp),
            Delta::Modify { id, kind, payload, timestamp } => self.modify(id, *kind, payload, *timestamp),
            Delta::Delete { id } => self.delete(id),
            Delta::ClearAll => self.clear(),
        }
    }

    fn create(&mut self, id: &ObjectId, kind: ShapeKind, payload: &Value, timestamp: i64) -> ApplyOutcome {
        if self.index.contains_key(id) {
            warn!("duplicate create for {}", id);
            return ApplyOutcome::DuplicateCreate;
        }
        self.objects.push(ObjectRecord::new(id.clone(), kind, payload.clone(), timestamp));
        self.index.insert(id.clone(), self.objects.len() - 1);
        ApplyOutcome::Applied
    }

    fn modify(&mut self, id: &ObjectId, kind: ShapeKind, payload: &Value, timestamp: i64) -> ApplyOutcome {
        let Some(&position) = self.index.get(id) else {
            warn!("modify for unknown object {}", id);
            return ApplyOutcome::UnknownId;
        };
        let existing = &mut self.objects[position];
        if !wins_over(kind, payload, timestamp, existing) {
            debug!("stale modify for {} ({} vs stored {})", id, timestamp, existing.timestamp);
            return ApplyOutcome::Stale;
        }
        existing.kind = kind;
        existing.payload = payload.clone();
        existing.timestamp = timestamp;
        ApplyOutcome::Applied
    }

    fn delete(&mut self, id: &ObjectId) -> ApplyOutcome {
        let Some(position) = self.index.remove(id) else {
            // Duplicate delivery of a delete is expected, not a violation
            return ApplyOutcome::UnknownId;
        };
        self.objects.remove(position);
        // Positions after the removal point shifted down by one
        for (shifted, record) in self.objects.iter().enumerate().skip(position) {
            self.index.insert(record.id.clone(), shifted);
        }
        ApplyOutcome::Applied
    }

    fn clear(&mut self) -> ApplyOutcome {
        self.objects.clear();
        self.index.clear();
        ApplyOutcome::Applied
    }
}

/// Last-writer-wins with a deterministic tie-break. A strictly newer
/// timestamp wins outright; an equal timestamp wins only if the incoming
/// (kind code, canonical payload text) orders after the stored one, so
/// every replica settles on the same record whatever the delivery order.
fn wins_over(kind: ShapeKind, payload: &Value, timestamp: i64, existing: &ObjectRecord) -> bool {
    if timestamp != existing.timestamp {
        return timestamp > existing.timestamp;
    }
    (kind.code(), payload.to_string()) > (existing.kind.code(), existing.payload.to_string())
}

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::warn;

use slate_proto::{wire, Delta, DecodeError, ObjectId, ObjectRecord, ReplicaId, ShapeKind};

use crate::broadcast::{Broadcast, IntoListener, ListenerGuard};
use crate::store::{ApplyOutcome, Operation, Store};

/// Bridges local edits and inbound peer deltas to the [`Store`], and fans
/// locally produced deltas out for transport.
///
/// The coordinator is stateless beyond the id counter: there is no pending
/// or in-flight delta state and no knowledge of delivery order. Ordering
/// tolerance lives in the store's last-writer-wins rule; retry and framing
/// live in the transport.
pub struct Session {
    store: Arc<Store>,
    replica: ReplicaId,
    next_object: AtomicU64,
    outbound: Broadcast<Delta>,
}

impl Session {
    pub fn new(replica: ReplicaId) -> Self { Self::with_store(replica, Arc::new(Store::new())) }

    pub fn with_store(replica: ReplicaId, store: Arc<Store>) -> Self {
        Self { store, replica, next_object: AtomicU64::new(0), outbound: Broadcast::new() }
    }

    pub fn store(&self) -> &Arc<Store> { &self.store }

    pub fn replica(&self) -> ReplicaId { self.replica }

    /// Mints an id no other replica can produce.
    pub fn mint_id(&self) -> ObjectId {
        let counter = self.next_object.fetch_add(1, Ordering::Relaxed) + 1;
        ObjectId::mint(&self.replica, counter)
    }

    /// A fresh record with a minted id and the current wall-clock
    /// timestamp, ready for [`Session::local_create`].
    pub fn new_record(&self, kind: ShapeKind, payload: Value) -> ObjectRecord {
        ObjectRecord::new(self.mint_id(), kind, payload, now_ms())
    }

    pub fn local_create(&self, record: &ObjectRecord) -> ApplyOutcome {
        self.local(Operation::Create, Some(record))
    }

    pub fn local_modify(&self, record: &ObjectRecord) -> ApplyOutcome {
        self.local(Operation::Modify, Some(record))
    }

    pub fn local_delete(&self, record: &ObjectRecord) -> ApplyOutcome {
        self.local(Operation::Delete, Some(record))
    }

    pub fn local_clear_all(&self) -> ApplyOutcome { self.local(Operation::ClearAll, None) }

    fn local(&self, operation: Operation, record: Option<&ObjectRecord>) -> ApplyOutcome {
        let delta = match Store::generate_delta(operation, record) {
            Ok(delta) => delta,
            Err(e) => {
                warn!("dropping local {:?}: {}", operation, e);
                return ApplyOutcome::Rejected;
            }
        };
        // Apply locally before broadcasting so this replica's own view is
        // never behind what it advertises. A local apply the store refuses
        // is not sent to peers.
        let outcome = self.store.apply(&delta);
        if outcome.applied() {
            self.outbound.send(delta);
        }
        outcome
    }

    /// Applies an inbound peer delta, then re-emits it for relay
    /// consumers. Applied deltas publish their snapshot from inside the
    /// store; dropped ones answer with the current state here, so a
    /// renderer driven by this session always hears back.
    pub fn remote_delta(&self, delta: &Delta) -> ApplyOutcome {
        let outcome = self.store.apply(delta);
        self.outbound.send(delta.clone());
        if !outcome.applied() {
            self.store.publish_snapshot();
        }
        outcome
    }

    /// Decodes and applies a wire-encoded delta. Malformed input is
    /// rejected whole, with a diagnostic, and never reaches the board.
    pub fn remote_delta_bytes(&self, bytes: &[u8]) -> Result<ApplyOutcome, DecodeError> {
        match wire::from_bytes(bytes) {
            Ok(delta) => Ok(self.remote_delta(&delta)),
            Err(e) => {
                warn!("rejecting malformed delta: {}", e);
                Err(e)
            }
        }
    }

    /// Register for outbound deltas: every locally applied mutation and
    /// every inbound delta relayed onward.
    pub fn on_delta<L>(&self, listener: L) -> ListenerGuard<Delta>
    where L: IntoListener<Delta> {
        self.outbound.listen(listener)
    }
}

fn now_ms() -> i64 { Utc::now().timestamp_millis() }

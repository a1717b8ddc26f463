//! # Slate
//!
//! Slate keeps every participant's copy of a shared drawing convergent. It
//! is the replication core of a collaborative whiteboard: a keyed, ordered
//! collection of drawable-object records, mutated one delta at a time with
//! last-writer-wins conflict resolution, tolerant of deltas arriving out of
//! order or more than once.
//!
//! ## Core Concepts
//!
//! - **ObjectRecord**: one shape's replicated state — id, kind, opaque
//!   payload, and the timestamp used as the conflict key
//! - **Delta**: a single create/modify/delete/clear change, the unit of
//!   propagation between replicas
//! - **Store**: the authoritative local collection; applies deltas and
//!   publishes per-object changes plus full snapshots to observers
//! - **Session**: turns local edits into deltas (apply locally, then
//!   broadcast) and folds inbound peer deltas back into the store
//!
//! ## Example
//!
//! ```rust
//! use slate::payload::{self, Point, Stroke};
//! use slate::{ReplicaId, Session, ShapeKind};
//!
//! let session = Session::new(ReplicaId::new());
//!
//! let record = session.new_record(
//!     ShapeKind::Line,
//!     payload::line(Point::new(0.0, 0.0), Point::new(10.0, 4.0), &Stroke::default()),
//! );
//! assert!(session.local_create(&record).applied());
//! assert_eq!(session.store().len(), 1);
//! ```
//!
//! Rendering, input handling and the network transport are external
//! collaborators: a renderer redraws from snapshots and change events, and
//! a transport carries the wire-encoded deltas emitted by the session to
//! peers, delivering inbound ones to [`Session::remote_delta_bytes`].

pub use slate_core as core;
pub use slate_proto as proto;

pub use slate_core::{
    board_file, broadcast, changes, error,
    session::Session,
    store::{ApplyOutcome, Operation, Store},
    BoardChange, Snapshot,
};
pub use slate_proto::{payload, wire, Delta, ObjectId, ObjectRecord, ReplicaId, ShapeKind};

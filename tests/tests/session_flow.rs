use common::*;

use std::collections::HashSet;

use anyhow::Result;
use serde_json::json;

use slate::payload::{self, Point, Stroke};
use slate::{wire, ReplicaId, Session, ShapeKind};

/// Full loop: local edits on A travel as wire bytes and replay on B.
#[test]
fn local_edits_replicate_through_the_wire() -> Result<()> {
    let a = Session::new(ReplicaId::new());
    let b = Session::new(ReplicaId::new());
    let (_guard, from_a) = outbound(&a);

    let mut record = a.new_record(
        ShapeKind::Polyline,
        payload::polyline(&[Point::new(0.0, 0.0), Point::new(5.0, 5.0)], &Stroke::default()),
    );
    a.local_create(&record);

    record.payload = payload::polyline(&[Point::new(0.0, 0.0), Point::new(9.0, 1.0)], &Stroke::new(5, "#ff0000"));
    record.timestamp += 1;
    a.local_modify(&record);

    while let Ok(delta) = from_a.try_recv() {
        assert!(b.remote_delta_bytes(&wire::to_bytes(&delta))?.applied());
    }

    assert_eq!(b.store().len(), 1);
    let replicated = b.store().get(&record.id).unwrap();
    assert_eq!(replicated.payload["thickness"], json!(5));
    assert_eq!(replicated.payload["color"], json!("#ff0000"));

    a.local_clear_all();
    b.remote_delta_bytes(&wire::to_bytes(&from_a.try_recv()?))?;
    assert!(b.store().is_empty());
    Ok(())
}

/// Ids minted by different replicas never collide.
#[test]
fn minted_ids_do_not_collide_across_replicas() {
    let a = Session::new(ReplicaId::new());
    let b = Session::new(ReplicaId::new());

    let mut ids = HashSet::new();
    for _ in 0..100 {
        assert!(ids.insert(a.mint_id()));
        assert!(ids.insert(b.mint_id()));
    }
}

/// An inbound delta is re-emitted for relay regardless of outcome, so a
/// downstream peer can hear it from this session.
#[test]
fn inbound_deltas_are_relayed_onward() -> Result<()> {
    let a = Session::new(ReplicaId::new());
    let b = Session::new(ReplicaId::new());
    let (_ga, from_a) = outbound(&a);
    let (_gb, from_b) = outbound(&b);

    a.local_create(&rectangle("A-1", 100));
    let delta = from_a.recv()?;
    b.remote_delta(&delta);

    assert_eq!(from_b.recv()?, delta);
    Ok(())
}

/// The decoded payload a remote create carries ends up verbatim in the
/// store; the core never reshapes it.
#[test]
fn payloads_are_carried_opaquely() -> Result<()> {
    let session = Session::new(ReplicaId::new());
    let wire_delta = json!({
        "action": "create",
        "peer-1": { "type": 4, "center": { "x": 3.0, "y": 4.0 }, "radius": 10.0, "glow": true },
        "timestamp": 100,
    });
    assert!(session.remote_delta_bytes(&serde_json::to_vec(&wire_delta)?)?.applied());

    let record = session.store().get(&"peer-1".into()).unwrap();
    assert_eq!(record.kind, ShapeKind::AssistCircle);
    // Unknown fields survive untouched
    assert_eq!(record.payload["glow"], json!(true));
    Ok(())
}

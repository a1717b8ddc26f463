use common::*;

use std::collections::HashSet;

use slate::{ApplyOutcome, Delta, Store};

/// After an arbitrary mix of deltas, ids are unique and every snapshot
/// record is reachable through the index.
#[test]
fn ids_stay_unique_and_indexed() {
    let store = Store::new();
    let deltas = [
        Delta::create(&rectangle("A-1", 100)),
        Delta::create(&line("A-2", 101)),
        Delta::create(&rectangle("A-1", 120)), // duplicate, refused
        Delta::delete("A-2".into()),
        Delta::create(&line("A-2", 130)), // reuse after delete
        Delta::modify(&rectangle("A-1", 140)),
        Delta::create(&rectangle("B-1", 105)),
        Delta::delete("never-existed".into()),
    ];
    for delta in &deltas {
        store.apply(delta);
    }

    let snapshot = store.snapshot();
    let ids: HashSet<_> = snapshot.iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids.len(), snapshot.len(), "duplicate id in snapshot");
    for record in &snapshot {
        assert_eq!(store.get(&record.id).as_ref(), Some(record));
    }
}

#[test]
fn delete_is_idempotent() {
    let store = Store::new();
    store.apply(&Delta::create(&rectangle("A-1", 100)));
    store.apply(&Delta::create(&line("A-2", 101)));

    assert_eq!(store.apply(&Delta::delete("A-1".into())), ApplyOutcome::Applied);
    let after_first = store.snapshot();
    assert_eq!(store.apply(&Delta::delete("A-1".into())), ApplyOutcome::UnknownId);
    assert_eq!(store.snapshot(), after_first);
}

#[test]
fn clear_all_is_total_and_ids_are_reusable() {
    let store = Store::new();
    store.apply(&Delta::create(&rectangle("A-1", 100)));
    store.apply(&Delta::create(&line("A-2", 101)));

    assert!(store.apply(&Delta::ClearAll).applied());
    assert!(store.snapshot().is_empty());

    // A previously used id is valid again after the board is cleared
    assert!(store.apply(&Delta::create(&line("A-1", 200))).applied());
    assert_eq!(store.get(&"A-1".into()).unwrap().timestamp, 200);
}

/// Clearing an already empty board is still an applied, published delta.
#[test]
fn clear_all_on_empty_board_applies() {
    let store = Store::new();
    assert!(store.apply(&Delta::ClearAll).applied());
}

/// Deletions close the gap without disturbing the relative z-order of the
/// surviving records.
#[test]
fn deletion_preserves_survivor_order() {
    let store = Store::new();
    for (id, ts) in [("A-1", 100), ("A-2", 101), ("A-3", 102), ("A-4", 103)] {
        store.apply(&Delta::create(&rectangle(id, ts)));
    }
    store.apply(&Delta::delete("A-2".into()));
    store.apply(&Delta::delete("A-4".into()));

    let order: Vec<_> = store.snapshot().iter().map(|r| r.id.to_string()).collect();
    assert_eq!(order, ["A-1", "A-3"]);
}

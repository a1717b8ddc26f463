use common::*;

use anyhow::Result;

use slate::{board_file, Delta, ReplicaId, Session, ShapeKind};

/// A board drawn through a session survives a save/load cycle byte for
/// byte, in z-order.
#[test]
fn boards_round_trip_through_disk() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sketch.slate");

    let author = Session::new(ReplicaId::new());
    author.local_create(&rectangle("A-1", 100));
    author.local_create(&line("A-2", 101));
    board_file::save(&path, author.store())?;

    let reader = Session::new(ReplicaId::new());
    assert_eq!(board_file::load(&path, reader.store())?, 2);
    assert_eq!(reader.store().snapshot(), author.store().snapshot());
    Ok(())
}

/// Loaded records pass through the live apply path, so observers hear
/// about them like any other edit.
#[test]
fn loading_notifies_observers() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sketch.slate");

    let author = Session::new(ReplicaId::new());
    author.local_create(&rectangle("A-1", 100));
    board_file::save(&path, author.store())?;

    let reader = Session::new(ReplicaId::new());
    let (tx, rx) = std::sync::mpsc::channel();
    let _guard = reader.store().on_change(tx);

    board_file::load(&path, reader.store())?;
    assert!(matches!(rx.try_recv()?, slate::BoardChange::Created { .. }));
    Ok(())
}

/// A failed load applies nothing: the existing board is untouched.
#[test]
fn failed_loads_leave_the_board_alone() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sketch.slate");
    std::fs::write(&path, b"scribbles")?;

    let session = Session::new(ReplicaId::new());
    session.local_create(&rectangle("A-1", 100));
    let before = session.store().snapshot();

    assert!(board_file::load(&path, session.store()).is_err());
    assert_eq!(session.store().snapshot(), before);
    Ok(())
}

/// Replace-not-merge is an explicit clear first, through the same delta
/// path as any other edit.
#[test]
fn clear_then_load_replaces_the_board() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sketch.slate");

    let author = Session::new(ReplicaId::new());
    author.local_create(&rectangle("saved-1", 100));
    board_file::save(&path, author.store())?;

    let session = Session::new(ReplicaId::new());
    session.local_create(&line("live-1", 200));
    session.local_clear_all();
    board_file::load(&path, session.store())?;

    let snapshot = session.store().snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, *"saved-1");
    assert_eq!(snapshot[0].kind, ShapeKind::Rectangle);
    Ok(())
}

/// Loading into a board that already holds one of the saved ids keeps the
/// live record and reports the smaller applied count.
#[test]
fn collisions_keep_the_live_record() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sketch.slate");

    let author = Session::new(ReplicaId::new());
    author.local_create(&rectangle("A-1", 100));
    author.local_create(&rectangle("A-2", 101));
    board_file::save(&path, author.store())?;

    let session = Session::new(ReplicaId::new());
    session.remote_delta(&Delta::create(&line("A-1", 500)));

    assert_eq!(board_file::load(&path, session.store())?, 1);
    assert_eq!(session.store().get(&"A-1".into()).unwrap().kind, ShapeKind::Line);
    Ok(())
}

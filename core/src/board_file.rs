//! Board files: the store's full snapshot written to disk, replayed as
//! synthetic create deltas on load so load-time validation is the same
//! `apply` path used for live editing.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use slate_proto::{Delta, ObjectId, ObjectRecord, ShapeKind};

use crate::error::BoardFileError;
use crate::store::Store;

const MAGIC: u32 = 0x534c_4254; // "SLBT"
const VERSION: u32 = 1;

/// On-disk record. The payload is embedded as JSON bytes; a free-form JSON
/// value is self-describing and does not round-trip through bincode.
#[derive(Serialize, Deserialize)]
struct StoredRecord {
    id: String,
    kind: i64,
    payload: Vec<u8>,
    timestamp: i64,
}

#[derive(Serialize, Deserialize)]
struct BoardFile {
    magic: u32,
    version: u32,
    records: Vec<StoredRecord>,
}

/// Writes the store's current snapshot to `path`.
pub fn save(path: impl AsRef<Path>, store: &Store) -> Result<(), BoardFileError> {
    let records = store
        .snapshot()
        .into_iter()
        .map(|record| StoredRecord {
            id: record.id.to_string(),
            kind: record.kind.code(),
            // Serializing a Value cannot fail
            payload: serde_json::to_vec(&record.payload).expect("payload is always serializable"),
            timestamp: record.timestamp,
        })
        .collect::<Vec<_>>();

    let bytes = bincode::serialize(&BoardFile { magic: MAGIC, version: VERSION, records })?;
    fs::write(path, bytes)?;
    Ok(())
}

/// Reads a board file and replays one synthetic create delta per stored
/// record, in file order, returning how many were applied. The file is
/// parsed and validated in full before the first delta applies, so a
/// failed load leaves the store untouched. Loading merges into whatever
/// the store already holds; replace semantics are a `ClearAll` issued by
/// the caller first.
pub fn load(path: impl AsRef<Path>, store: &Store) -> Result<usize, BoardFileError> {
    let bytes = fs::read(path)?;
    let file: BoardFile = bincode::deserialize(&bytes)?;
    if file.magic != MAGIC {
        return Err(BoardFileError::BadMagic(file.magic));
    }
    if file.version != VERSION {
        return Err(BoardFileError::UnsupportedVersion(file.version));
    }

    let mut records = Vec::with_capacity(file.records.len());
    for (position, stored) in file.records.into_iter().enumerate() {
        let kind = ShapeKind::try_from(stored.kind).map_err(|e| BoardFileError::InvalidRecord(position, e))?;
        let payload = serde_json::from_slice(&stored.payload).map_err(|e| BoardFileError::InvalidRecord(position, e.into()))?;
        records.push(ObjectRecord::new(ObjectId::from(stored.id), kind, payload, stored.timestamp));
    }

    let mut applied = 0;
    for record in &records {
        if store.apply(&Delta::create(record)).applied() {
            applied += 1;
        } else {
            warn!("board file record {} collides with a live object, skipped", record.id);
        }
    }
    Ok(applied)
}

use thiserror::Error;

use crate::store::Operation;

pub use slate_proto::DecodeError;

/// A local mutation intent that cannot be packaged into a delta.
#[derive(Error, Debug)]
pub enum DeltaError {
    #[error("{0:?} requires a record")]
    MissingRecord(Operation),
}

/// Failure while reading or writing a board file. Every load-side variant
/// is raised before any record applies, so the store is never left
/// partially populated by a bad file.
#[derive(Error, Debug)]
pub enum BoardFileError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a board file (magic {0:#010x})")]
    BadMagic(u32),
    #[error("unsupported board file version {0}")]
    UnsupportedVersion(u32),
    #[error("corrupt board file: {0}")]
    Corrupt(#[from] bincode::Error),
    #[error("record {0} is not decodable: {1}")]
    InvalidRecord(usize, DecodeError),
}

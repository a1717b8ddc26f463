use thiserror::Error;

/// Reasons a wire delta is rejected before it reaches the board. A rejected
/// delta is dropped whole; it is never partially applied.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("delta is not a JSON object")]
    NotAnObject,
    #[error("delta has no action field")]
    MissingAction,
    #[error("unknown action {0:?}")]
    UnknownAction(String),
    #[error("delta carries no object id entry")]
    MissingObjectEntry,
    #[error("payload for {0} is not a JSON object")]
    PayloadNotAnObject(String),
    #[error("delta has no integer timestamp")]
    MissingTimestamp,
    #[error("payload carries no shape kind code")]
    MissingKind,
    #[error("unknown shape kind code {0}")]
    UnknownKind(i64),
    #[error("invalid replica id")]
    InvalidReplicaId,
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub mod delta;
pub mod error;
pub mod id;
pub mod payload;
pub mod record;
pub mod wire;

pub use delta::Delta;
pub use error::DecodeError;
pub use id::{ObjectId, ReplicaId};
pub use record::{ObjectRecord, ShapeKind};

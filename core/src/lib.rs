pub mod board_file;
pub mod broadcast;
pub mod changes;
pub mod error;
pub mod session;
pub mod store;

pub use changes::{BoardChange, Snapshot};
pub use session::Session;
pub use store::{ApplyOutcome, Operation, Store};

pub use slate_proto as proto;

use std::fmt;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::DecodeError;

/// Identity of one replica, assigned once when its session starts.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ReplicaId(Ulid);

impl ReplicaId {
    pub fn new() -> Self { ReplicaId(Ulid::new()) }

    pub fn from_bytes(bytes: [u8; 16]) -> Self { ReplicaId(Ulid::from_bytes(bytes)) }

    pub fn to_bytes(&self) -> [u8; 16] { self.0.to_bytes() }

    /// Abbreviated form for log lines. Minted object ids use the full form.
    pub fn to_short(&self) -> String {
        let value = self.0.to_string();
        value[value.len() - 6..].to_string()
    }
}

impl fmt::Display for ReplicaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if f.alternate() {
            write!(f, "{}", self.to_short())
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl fmt::Debug for ReplicaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl TryFrom<&str> for ReplicaId {
    type Error = DecodeError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(ReplicaId(Ulid::from_string(value).map_err(|_| DecodeError::InvalidReplicaId)?))
    }
}

impl Default for ReplicaId {
    fn default() -> Self { Self::new() }
}

/// Key of one replicated object. Remote ids are opaque strings; locally
/// minted ids take the `<replica>-<counter>` form so two replicas can never
/// collide without coordination.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn mint(replica: &ReplicaId, counter: u64) -> Self { ObjectId(format!("{}-{}", replica, counter)) }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl From<&str> for ObjectId {
    fn from(val: &str) -> Self { ObjectId(val.to_string()) }
}

impl From<String> for ObjectId {
    fn from(val: String) -> Self { ObjectId(val) }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self { id.0 }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str { &self.0 }
}

impl PartialEq<str> for ObjectId {
    fn eq(&self, other: &str) -> bool { self.0 == other }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

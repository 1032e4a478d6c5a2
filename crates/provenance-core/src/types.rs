//! Common types used across the provenance ledger

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned to a registered item (starts at 1, never reused)
pub type ItemId = u64;

/// Position of an event within one item's history (starts at 1)
pub type SequenceNumber = u64;

/// Externally supplied logical clock value ("block height")
///
/// Stored on records as an opaque timestamp. The ledger never compares it.
pub type Height = u64;

/// Opaque identity of an actor (human, wallet, or service)
///
/// Compared by exact string equality; no internal structure is interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Create a principal from its identity string
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The identity string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Principal {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Principal {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Composite key of an event: (item, per-item sequence number)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventKey {
    pub item_id: ItemId,
    pub sequence: SequenceNumber,
}

impl EventKey {
    pub fn new(item_id: ItemId, sequence: SequenceNumber) -> Self {
        Self { item_id, sequence }
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.item_id, self.sequence)
    }
}

/// Qualified roles an admin can grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May record authentication verdicts
    Expert,
    /// May record restoration events
    Restorer,
}

impl Role {
    /// All roles, in a stable order
    pub const ALL: [Role; 2] = [Role::Expert, Role::Restorer];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Expert => "expert",
            Role::Restorer => "restorer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

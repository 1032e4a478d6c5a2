//! Storage abstraction for the ledger
//!
//! Registries and logs keep their records behind the [`KvStore`] trait so the
//! persistence engine can be swapped without touching the ledger rules. The
//! in-memory backend is the default.
//!
//! Backends are assumed durable and linearizable per key. Multi-key atomicity
//! (counter plus payload) is provided by the ledger's own locks, not by the
//! backend.

pub mod memory;

pub use memory::MemoryKv;

use std::fmt::Debug;
use std::hash::Hash;

/// Key-value persistence collaborator
///
/// Implementations must be thread-safe and support concurrent access.
pub trait KvStore<K, V>: Send + Sync + Debug
where
    K: Eq + Hash,
{
    /// Read the value stored under `key`
    fn get(&self, key: &K) -> Option<V>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: K, value: V);

    /// Whether a value is stored under `key`
    fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Number of stored entries
    fn len(&self) -> usize;

    /// Whether the store holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

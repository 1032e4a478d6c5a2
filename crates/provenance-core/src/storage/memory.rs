//! In-memory storage backend
//!
//! Default storage implementation using a hashmap behind a read-write lock.
//! Suitable for development, tests and single-instance deployments.
//! Data is lost on restart.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use parking_lot::RwLock;

use super::KvStore;

/// In-memory key-value store
pub struct MemoryKv<K, V> {
    entries: RwLock<HashMap<K, V>>,
}

impl<K, V> MemoryKv<K, V> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> Default for MemoryKv<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for MemoryKv<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryKv")
            .field("entries", &self.entries.read().len())
            .finish()
    }
}

impl<K, V> KvStore<K, V> for MemoryKv<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn get(&self, key: &K) -> Option<V> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: K, value: V) {
        self.entries.write().insert(key, value);
    }

    fn contains(&self, key: &K) -> bool {
        self.entries.read().contains_key(key)
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventKey;

    #[test]
    fn test_get_set() {
        let store: MemoryKv<u64, String> = MemoryKv::new();
        assert!(store.is_empty());
        assert_eq!(store.get(&1), None);

        store.set(1, "first".to_string());
        assert_eq!(store.get(&1), Some("first".to_string()));
        assert!(store.contains(&1));
        assert!(!store.contains(&2));

        store.set(1, "replaced".to_string());
        assert_eq!(store.get(&1), Some("replaced".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_composite_keys() {
        let store: MemoryKv<EventKey, &'static str> = MemoryKv::new();
        store.set(EventKey::new(1, 1), "a");
        store.set(EventKey::new(1, 2), "b");
        store.set(EventKey::new(2, 1), "c");

        assert_eq!(store.get(&EventKey::new(1, 2)), Some("b"));
        assert_eq!(store.get(&EventKey::new(2, 1)), Some("c"));
        assert_eq!(store.get(&EventKey::new(2, 2)), None);
        assert_eq!(store.len(), 3);
    }
}

//! Item Registry
//!
//! Assigns identifiers to collectible items in registration order, starting
//! at 1. Identifiers are never reused and items are never modified.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::records::{Item, NewItem};
use crate::storage::{KvStore, MemoryKv};
use crate::types::{Height, ItemId, Principal};

/// Storage key of the last assigned item identifier
///
/// Kept in the store next to the items so a durable backend resumes
/// numbering where it left off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HighWaterMark;

/// Auto-incrementing registry of items
pub struct ItemRegistry {
    items: Arc<dyn KvStore<ItemId, Item>>,
    last_id: Arc<dyn KvStore<HighWaterMark, ItemId>>,
    /// Held across read-last-id, write-item, write-last-id
    write_lock: Mutex<()>,
}

impl ItemRegistry {
    /// Create an empty in-memory registry
    pub fn new() -> Self {
        Self::with_store(
            Arc::new(MemoryKv::<ItemId, Item>::new()),
            Arc::new(MemoryKv::<HighWaterMark, ItemId>::new()),
        )
    }

    /// Create a registry over existing stores
    pub fn with_store(
        items: Arc<dyn KvStore<ItemId, Item>>,
        last_id: Arc<dyn KvStore<HighWaterMark, ItemId>>,
    ) -> Self {
        Self {
            items,
            last_id,
            write_lock: Mutex::new(()),
        }
    }

    /// Register a new item and return its identifier
    ///
    /// Registration is not gated; any principal may register items.
    pub fn register(&self, new: NewItem, registered_by: Principal, height: Height) -> ItemId {
        let _guard = self.write_lock.lock();

        let id = self.last_id() + 1;
        let item = Item::from_new(id, new, registered_by, height);
        info!(
            item_id = id,
            name = %item.name,
            registered_by = %item.registered_by,
            height,
            "Registered item"
        );
        self.items.set(id, item);
        self.last_id.set(HighWaterMark, id);

        id
    }

    /// Look up an item
    pub fn get(&self, id: ItemId) -> Option<Item> {
        self.items.get(&id)
    }

    /// Whether an item with this identifier exists
    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains(&id)
    }

    /// The last assigned identifier, 0 if no item has been registered
    pub fn last_id(&self) -> ItemId {
        self.last_id.get(&HighWaterMark).unwrap_or(0)
    }
}

impl Default for ItemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ItemRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemRegistry")
            .field("last_id", &self.last_id())
            .finish()
    }
}

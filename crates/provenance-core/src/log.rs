//! Sequenced Event Log
//!
//! Generic append-only log keyed by (item, per-item sequence number). Each
//! item has its own counter, starting at 0, that advances by exactly one per
//! successful append. The sequence numbers of an item therefore form the
//! contiguous range `1..=count(item)`.
//!
//! ## Append protocol
//!
//! 1. Run the write gate. A refusal returns before any state is touched.
//! 2. Take the item's lock.
//! 3. Read the counter (default 0) and compute `next = counter + 1`.
//! 4. Store the payload under `(item, next)`.
//! 5. Store the counter `next`.
//!
//! The payload is written before the counter, so a reader that observes
//! `count(item) == n` can always read event `n`.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::gate::WriteGate;
use crate::storage::{KvStore, MemoryKv};
use crate::types::{EventKey, ItemId, Principal, SequenceNumber};

/// Number of lock stripes shared by all items of one log
const LOCK_STRIPES: usize = 16;

/// Append-only log of events of type `P`
pub struct SequencedEventLog<P> {
    /// Log name used in tracing output
    name: &'static str,
    records: Arc<dyn KvStore<EventKey, P>>,
    counters: Arc<dyn KvStore<ItemId, SequenceNumber>>,
    /// Item `i` is guarded by `stripes[i % LOCK_STRIPES]`
    stripes: Box<[Mutex<()>]>,
}

impl<P> SequencedEventLog<P>
where
    P: Clone + Send + Sync + 'static,
{
    /// Create an empty in-memory log
    pub fn new(name: &'static str) -> Self {
        Self::with_store(
            name,
            Arc::new(MemoryKv::<EventKey, P>::new()),
            Arc::new(MemoryKv::<ItemId, SequenceNumber>::new()),
        )
    }

    /// Create a log over existing stores
    pub fn with_store(
        name: &'static str,
        records: Arc<dyn KvStore<EventKey, P>>,
        counters: Arc<dyn KvStore<ItemId, SequenceNumber>>,
    ) -> Self {
        let stripes = (0..LOCK_STRIPES)
            .map(|_| Mutex::new(()))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self {
            name,
            records,
            counters,
            stripes,
        }
    }

    /// Append `payload` to the history of `item_id`
    ///
    /// Returns the sequence number assigned to the event.
    pub fn append<G>(
        &self,
        item_id: ItemId,
        acting: &Principal,
        gate: &G,
        payload: P,
    ) -> Result<SequenceNumber>
    where
        G: WriteGate + ?Sized,
    {
        if let Err(err) = gate.admit(acting) {
            warn!(
                log = self.name,
                item_id,
                acting = %acting,
                error = %err,
                "Refused event append"
            );
            return Err(err);
        }

        let _guard = self.stripe(item_id).lock();
        let next = self.count(item_id) + 1;
        self.records.set(EventKey::new(item_id, next), payload);
        self.counters.set(item_id, next);

        info!(
            log = self.name,
            item_id,
            sequence = next,
            acting = %acting,
            "Appended event"
        );
        Ok(next)
    }

    /// Look up one event
    pub fn get(&self, item_id: ItemId, sequence: SequenceNumber) -> Option<P> {
        self.records.get(&EventKey::new(item_id, sequence))
    }

    /// Number of events recorded for `item_id`
    pub fn count(&self, item_id: ItemId) -> SequenceNumber {
        self.counters.get(&item_id).unwrap_or(0)
    }

    /// The most recent event for `item_id`
    pub fn latest(&self, item_id: ItemId) -> Option<P> {
        match self.count(item_id) {
            0 => None,
            last => self.get(item_id, last),
        }
    }

    /// All events for `item_id`, oldest first
    pub fn history(&self, item_id: ItemId) -> Vec<P> {
        let count = self.count(item_id);
        debug!(log = self.name, item_id, count, "Reading event history");
        (1..=count)
            .filter_map(|sequence| self.get(item_id, sequence))
            .collect()
    }

    fn stripe(&self, item_id: ItemId) -> &Mutex<()> {
        &self.stripes[(item_id % LOCK_STRIPES as u64) as usize]
    }
}

impl<P> fmt::Debug for SequencedEventLog<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequencedEventLog")
            .field("name", &self.name)
            .field("records", &self.records.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use std::collections::BTreeSet;

    struct Allow;
    struct Deny;

    impl WriteGate for Allow {
        fn admit(&self, _acting: &Principal) -> Result<()> {
            Ok(())
        }
    }

    impl WriteGate for Deny {
        fn admit(&self, _acting: &Principal) -> Result<()> {
            Err(LedgerError::active_role_required())
        }
    }

    fn actor() -> Principal {
        Principal::from("ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG")
    }

    #[test]
    fn test_first_append_is_one() {
        let log: SequencedEventLog<String> = SequencedEventLog::new("test");
        assert_eq!(log.count(1), 0);

        let seq = log.append(1, &actor(), &Allow, "first".into()).unwrap();
        assert_eq!(seq, 1);
        assert_eq!(log.count(1), 1);
        assert_eq!(log.get(1, 1), Some("first".to_string()));
    }

    #[test]
    fn test_sequence_is_contiguous() {
        let log: SequencedEventLog<u32> = SequencedEventLog::new("test");
        for expected in 1..=10u64 {
            let seq = log.append(7, &actor(), &Allow, expected as u32).unwrap();
            assert_eq!(seq, expected);
            assert_eq!(log.count(7), expected);
        }
        assert_eq!(log.history(7), (1..=10).collect::<Vec<u32>>());
        assert_eq!(log.latest(7), Some(10));
    }

    #[test]
    fn test_items_have_independent_counters() {
        let log: SequencedEventLog<&'static str> = SequencedEventLog::new("test");
        log.append(1, &actor(), &Allow, "a").unwrap();
        log.append(1, &actor(), &Allow, "b").unwrap();
        // 17 shares a lock stripe with 1 but not a counter
        assert_eq!(log.append(17, &actor(), &Allow, "c").unwrap(), 1);
        assert_eq!(log.append(2, &actor(), &Allow, "d").unwrap(), 1);

        assert_eq!(log.count(1), 2);
        assert_eq!(log.count(17), 1);
        assert_eq!(log.count(2), 1);
    }

    #[test]
    fn test_refused_append_changes_nothing() {
        let log: SequencedEventLog<&'static str> = SequencedEventLog::new("test");
        log.append(1, &actor(), &Allow, "kept").unwrap();

        let result = log.append(1, &actor(), &Deny, "dropped");
        assert_eq!(result, Err(LedgerError::active_role_required()));
        assert_eq!(log.count(1), 1);
        assert_eq!(log.get(1, 2), None);

        // The next successful append takes the next free number
        assert_eq!(log.append(1, &actor(), &Allow, "next").unwrap(), 2);
    }

    #[test]
    fn test_unknown_keys_are_none() {
        let log: SequencedEventLog<u8> = SequencedEventLog::new("test");
        assert_eq!(log.get(1, 1), None);
        assert_eq!(log.get(1, 0), None);
        assert_eq!(log.latest(1), None);
        assert!(log.history(1).is_empty());
    }

    #[test]
    fn test_concurrent_appends_get_distinct_numbers() {
        let log: SequencedEventLog<usize> = SequencedEventLog::new("test");
        let threads = 8;
        let per_thread = 50;

        let assigned: Vec<SequenceNumber> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..threads)
                .map(|t| {
                    let log = &log;
                    scope.spawn(move || {
                        (0..per_thread)
                            .map(|i| log.append(3, &actor(), &Allow, t * per_thread + i).unwrap())
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|handle| handle.join().unwrap())
                .collect()
        });

        let total = (threads * per_thread) as u64;
        let unique: BTreeSet<_> = assigned.iter().copied().collect();
        assert_eq!(unique.len() as u64, total);
        assert_eq!(unique, (1..=total).collect::<BTreeSet<_>>());
        assert_eq!(log.count(3), total);
        assert_eq!(log.history(3).len() as u64, total);
    }
}

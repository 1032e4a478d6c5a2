//! Logical clock for stamping writes
//!
//! Heights are strictly increasing for the lifetime of the process. They
//! order writes; they are not wall-clock time.

use std::sync::atomic::{AtomicU64, Ordering};

use provenance_core::Height;

/// Monotonic height counter shared by all handlers
#[derive(Debug, Default)]
pub struct LogicalClock {
    height: AtomicU64,
}

impl LogicalClock {
    /// Create a clock whose first tick returns `start + 1`
    pub fn new(start: Height) -> Self {
        Self {
            height: AtomicU64::new(start),
        }
    }

    /// Advance the clock and return the new height
    pub fn tick(&self) -> Height {
        self.height.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// The most recently issued height
    pub fn current(&self) -> Height {
        self.height.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::thread;

    #[test]
    fn test_tick_advances() {
        let clock = LogicalClock::new(100);
        assert_eq!(clock.current(), 100);
        assert_eq!(clock.tick(), 101);
        assert_eq!(clock.tick(), 102);
        assert_eq!(clock.current(), 102);
    }

    #[test]
    fn test_concurrent_ticks_are_unique() {
        let clock = LogicalClock::default();

        let heights: BTreeSet<Height> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| (0..100).map(|_| clock.tick()).collect::<Vec<_>>()))
                .collect();
            handles
                .into_iter()
                .flat_map(|handle| handle.join().unwrap())
                .collect()
        });

        assert_eq!(heights.len(), 800);
        assert_eq!(heights, (1..=800).collect::<BTreeSet<_>>());
    }
}

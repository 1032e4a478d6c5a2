//! Shared application state

use parking_lot::Mutex;
use provenance_core::{Height, Ledger};
use tracing::info;

use crate::clock::LogicalClock;
use crate::config::ServiceConfig;

/// Application state shared across handlers
#[derive(Debug)]
pub struct AppState {
    /// The provenance ledger
    pub ledger: Ledger,
    /// Source of heights for accepted writes
    pub clock: LogicalClock,
    /// Service configuration
    pub config: ServiceConfig,
    /// Held across a clock tick and the ledger write it stamps
    write_lock: Mutex<()>,
}

impl AppState {
    /// Build an empty ledger administered by `config.admin`
    pub fn new(config: ServiceConfig) -> Self {
        info!(name = %config.name, admin = %config.admin, "Creating application state");
        Self {
            ledger: Ledger::new(config.admin.clone()),
            clock: LogicalClock::new(config.start_height),
            config,
            write_lock: Mutex::new(()),
        }
    }

    /// Tick the clock and run `write` with the new height
    ///
    /// Stamped writes commit in height order, so heights never go backwards
    /// along item identifiers or event sequence numbers.
    pub fn stamped<T>(&self, write: impl FnOnce(Height) -> T) -> (Height, T) {
        let _guard = self.write_lock.lock();
        let height = self.clock.tick();
        (height, write(height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use provenance_core::{NewItem, Principal};
    use std::thread;

    #[test]
    fn test_stamped_heights_follow_commit_order() {
        let state = AppState::new(ServiceConfig::new(Principal::from("ADMIN")));

        thread::scope(|scope| {
            for worker in 0..8 {
                let state = &state;
                scope.spawn(move || {
                    for n in 0..50 {
                        state.stamped(|height| {
                            state.ledger.register_item(
                                &Principal::new(format!("ST{worker}")),
                                NewItem::new(format!("Item {n}"), "", "", ""),
                                height,
                            )
                        });
                    }
                });
            }
        });

        assert_eq!(state.ledger.last_item_id(), 400);
        assert_eq!(state.clock.current(), 400);
        for id in 1..=400 {
            let item = state.ledger.get_item(id).unwrap();
            assert_eq!(item.registration_height, id);
        }
    }
}

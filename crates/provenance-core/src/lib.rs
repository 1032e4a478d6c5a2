//! # Provenance Core
//!
//! Provenance ledger for physical collectible items: a registry of items, a
//! role-gated set of qualified actors (experts and restorers), and append-only
//! logs of what those actors did to each item.
//!
//! ## Key Concepts
//!
//! - **Principal**: opaque actor identity, compared by equality only
//! - **Role registry**: admin-managed records of experts or restorers
//! - **Item registry**: items numbered 1, 2, 3, ... in registration order
//! - **Sequenced event log**: per-item append-only history with contiguous
//!   sequence numbers
//! - **Write gate**: the check every write passes before taking effect
//!
//! ## Ledger Invariants
//!
//! 1. **Identity**: item identifiers are unique and densely assigned from 1
//! 2. **Sequence**: per item, event numbers are exactly `1..=count`
//! 3. **Gating**: role mutations need the admin; events need an active role
//! 4. **Append-only**: nothing is deleted or amended; deactivation only clears
//!    a flag
//!
//! The ledger is synchronous. Callers supply an already-authenticated
//! principal and a logical clock value ("height") for each write.

pub mod error;
pub mod gate;
pub mod items;
pub mod ledger;
pub mod log;
pub mod records;
pub mod roles;
pub mod storage;
pub mod types;

pub use error::{LedgerError, Missing, Result, UnauthorizedReason};
pub use gate::{can_write, ActiveRoleGate, AdminGate, WriteGate};
pub use items::{HighWaterMark, ItemRegistry};
pub use ledger::Ledger;
pub use log::SequencedEventLog;
pub use records::{
    AuthenticationEvent, Item, NewItem, RestorationCount, RestorationDetails, RestorationEvent,
    RoleRecord,
};
pub use roles::RoleRegistry;
pub use storage::{KvStore, MemoryKv};
pub use types::{EventKey, Height, ItemId, Principal, Role, SequenceNumber};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the library version
pub fn version() -> &'static str {
    VERSION
}

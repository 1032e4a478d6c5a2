//! Ledger facade
//!
//! Composes the role registries, the item registry and the two event logs,
//! and applies the right gate to every write:
//!
//! | Write                | Gate                                   |
//! |----------------------|----------------------------------------|
//! | register/deactivate role | acting principal is the admin      |
//! | register item        | none                                   |
//! | authenticate item    | active expert, then item must exist    |
//! | record restoration   | active restorer, then item must exist  |
//!
//! Reads are public and never fail.
//!
//! Role mutations and event appends are ordered by one ledger-wide lock: an
//! append holds it shared across its gate check and its write, a role
//! mutation holds it exclusively. Once a deactivation returns, no append
//! that checked the old record can still commit.

use parking_lot::RwLock;
use tracing::info;

use crate::error::{LedgerError, Missing, Result};
use crate::gate::{ActiveRoleGate, WriteGate};
use crate::items::ItemRegistry;
use crate::log::SequencedEventLog;
use crate::records::{
    AuthenticationEvent, Item, NewItem, RestorationCount, RestorationDetails, RestorationEvent,
    RoleRecord,
};
use crate::roles::RoleRegistry;
use crate::types::{Height, ItemId, Principal, Role, SequenceNumber};

/// Gate for event appends: an active role holder writing about a known item
struct EventGate<'a> {
    role: ActiveRoleGate<'a>,
    items: &'a ItemRegistry,
    item_id: ItemId,
}

impl WriteGate for EventGate<'_> {
    fn admit(&self, acting: &Principal) -> Result<()> {
        self.role.admit(acting)?;
        if self.items.contains(self.item_id) {
            Ok(())
        } else {
            Err(LedgerError::NotFound(Missing::Item(self.item_id)))
        }
    }
}

/// Provenance ledger for collectible items
#[derive(Debug)]
pub struct Ledger {
    experts: RoleRegistry,
    restorers: RoleRegistry,
    items: ItemRegistry,
    authentications: SequencedEventLog<AuthenticationEvent>,
    restorations: SequencedEventLog<RestorationEvent>,
    /// Shared by appends, exclusive for role mutations
    role_lock: RwLock<()>,
}

impl Ledger {
    /// Create an empty in-memory ledger administered by `admin`
    ///
    /// The admin is fixed for the lifetime of the ledger.
    pub fn new(admin: Principal) -> Self {
        info!(admin = %admin, "Ledger initialized");
        Self {
            experts: RoleRegistry::new(Role::Expert, admin.clone()),
            restorers: RoleRegistry::new(Role::Restorer, admin),
            items: ItemRegistry::new(),
            authentications: SequencedEventLog::new("authentications"),
            restorations: SequencedEventLog::new("restorations"),
            role_lock: RwLock::new(()),
        }
    }

    /// Assemble a ledger from pre-built components
    ///
    /// Both role registries must share the same admin.
    pub fn from_parts(
        experts: RoleRegistry,
        restorers: RoleRegistry,
        items: ItemRegistry,
        authentications: SequencedEventLog<AuthenticationEvent>,
        restorations: SequencedEventLog<RestorationEvent>,
    ) -> Option<Self> {
        if experts.admin() != restorers.admin()
            || experts.role() != Role::Expert
            || restorers.role() != Role::Restorer
        {
            return None;
        }

        Some(Self {
            experts,
            restorers,
            items,
            authentications,
            restorations,
            role_lock: RwLock::new(()),
        })
    }

    /// The admin principal
    pub fn admin(&self) -> &Principal {
        self.experts.admin()
    }

    /// The registry for `role`
    ///
    /// Mutating the registry directly bypasses the ordering against event
    /// appends; use [`Ledger::register_role`] and [`Ledger::deactivate_role`].
    pub fn registry(&self, role: Role) -> &RoleRegistry {
        match role {
            Role::Expert => &self.experts,
            Role::Restorer => &self.restorers,
        }
    }

    /// The item registry
    pub fn items(&self) -> &ItemRegistry {
        &self.items
    }

    // =========================================================================
    // Roles
    // =========================================================================

    /// Register `target` in the registry for `role` (admin only)
    pub fn register_role(
        &self,
        role: Role,
        acting: &Principal,
        target: Principal,
        name: impl Into<String>,
        credentials: impl Into<String>,
    ) -> Result<()> {
        let _guard = self.role_lock.write();
        self.registry(role).register(acting, target, name, credentials)
    }

    /// Register an expert (admin only)
    pub fn register_expert(
        &self,
        acting: &Principal,
        expert: Principal,
        name: impl Into<String>,
        credentials: impl Into<String>,
    ) -> Result<()> {
        self.register_role(Role::Expert, acting, expert, name, credentials)
    }

    /// Register a restorer (admin only)
    pub fn register_restorer(
        &self,
        acting: &Principal,
        restorer: Principal,
        name: impl Into<String>,
        credentials: impl Into<String>,
    ) -> Result<()> {
        self.register_role(Role::Restorer, acting, restorer, name, credentials)
    }

    /// Deactivate `target` in the registry for `role` (admin only)
    pub fn deactivate_role(&self, role: Role, acting: &Principal, target: &Principal) -> Result<()> {
        let _guard = self.role_lock.write();
        self.registry(role).deactivate(acting, target)
    }

    /// Whether `principal` has an expert record
    pub fn is_expert(&self, principal: &Principal) -> bool {
        self.experts.is_registered(principal)
    }

    /// Whether `principal` has a restorer record
    pub fn is_approved_restorer(&self, principal: &Principal) -> bool {
        self.restorers.is_registered(principal)
    }

    /// The record of `principal` in the registry for `role`
    pub fn role_record(&self, role: Role, principal: &Principal) -> Option<RoleRecord> {
        self.registry(role).get(principal)
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Register an item on behalf of `acting`
    pub fn register_item(&self, acting: &Principal, item: NewItem, height: Height) -> ItemId {
        self.items.register(item, acting.clone(), height)
    }

    pub fn get_item(&self, item_id: ItemId) -> Option<Item> {
        self.items.get(item_id)
    }

    pub fn last_item_id(&self) -> ItemId {
        self.items.last_id()
    }

    // =========================================================================
    // Authentications
    // =========================================================================

    /// Record an expert's verdict on an item
    ///
    /// Every verdict is kept; [`Ledger::get_authentication`] returns the latest.
    pub fn authenticate_item(
        &self,
        acting: &Principal,
        item_id: ItemId,
        verdict: bool,
        notes: impl Into<String>,
        height: Height,
    ) -> Result<SequenceNumber> {
        let gate = self.event_gate(&self.experts, item_id);
        let event = AuthenticationEvent {
            expert: acting.clone(),
            verdict,
            notes: notes.into(),
            height,
        };
        let _guard = self.role_lock.read();
        self.authentications.append(item_id, acting, &gate, event)
    }

    /// The latest authentication verdict for an item
    pub fn get_authentication(&self, item_id: ItemId) -> Option<AuthenticationEvent> {
        self.authentications.latest(item_id)
    }

    /// One authentication verdict by its sequence number
    pub fn get_authentication_at(
        &self,
        item_id: ItemId,
        sequence: SequenceNumber,
    ) -> Option<AuthenticationEvent> {
        self.authentications.get(item_id, sequence)
    }

    pub fn authentication_count(&self, item_id: ItemId) -> u64 {
        self.authentications.count(item_id)
    }

    /// All verdicts for an item, oldest first
    pub fn authentication_history(&self, item_id: ItemId) -> Vec<AuthenticationEvent> {
        self.authentications.history(item_id)
    }

    // =========================================================================
    // Restorations
    // =========================================================================

    /// Record a restoration performed by `acting`
    pub fn record_restoration(
        &self,
        acting: &Principal,
        item_id: ItemId,
        details: RestorationDetails,
        height: Height,
    ) -> Result<SequenceNumber> {
        let gate = self.event_gate(&self.restorers, item_id);
        let event = RestorationEvent::from_details(acting.clone(), details, height);
        let _guard = self.role_lock.read();
        self.restorations.append(item_id, acting, &gate, event)
    }

    pub fn get_restoration(
        &self,
        item_id: ItemId,
        sequence: SequenceNumber,
    ) -> Option<RestorationEvent> {
        self.restorations.get(item_id, sequence)
    }

    pub fn get_restoration_count(&self, item_id: ItemId) -> RestorationCount {
        RestorationCount {
            count: self.restorations.count(item_id),
        }
    }

    /// All restorations of an item, oldest first
    pub fn restoration_history(&self, item_id: ItemId) -> Vec<RestorationEvent> {
        self.restorations.history(item_id)
    }

    fn event_gate<'a>(&'a self, registry: &'a RoleRegistry, item_id: ItemId) -> EventGate<'a> {
        EventGate {
            role: ActiveRoleGate::new(registry),
            items: &self.items,
            item_id,
        }
    }
}

//! Role Registry
//!
//! Maps principals to role records for one qualified role (experts or
//! restorers). Only the admin fixed at construction can add, replace or
//! deactivate records. Records are never deleted.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::error::{LedgerError, Missing, Result};
use crate::gate::{AdminGate, WriteGate};
use crate::records::RoleRecord;
use crate::storage::{KvStore, MemoryKv};
use crate::types::{Principal, Role};

/// Admin-gated registry of role records
pub struct RoleRegistry {
    role: Role,
    admin: Principal,
    records: Arc<dyn KvStore<Principal, RoleRecord>>,
    /// Serializes mutations; reads go straight to the store
    write_lock: Mutex<()>,
}

impl RoleRegistry {
    /// Create an in-memory registry administered by `admin`
    pub fn new(role: Role, admin: Principal) -> Self {
        Self::with_store(role, admin, Arc::new(MemoryKv::<Principal, RoleRecord>::new()))
    }

    /// Create a registry over an existing store
    pub fn with_store(
        role: Role,
        admin: Principal,
        records: Arc<dyn KvStore<Principal, RoleRecord>>,
    ) -> Self {
        Self {
            role,
            admin,
            records,
            write_lock: Mutex::new(()),
        }
    }

    /// The role this registry manages
    pub fn role(&self) -> Role {
        self.role
    }

    /// The admin principal
    pub fn admin(&self) -> &Principal {
        &self.admin
    }

    /// Register (or re-register) `target` with an active record
    ///
    /// An existing record is replaced, which also reactivates it.
    pub fn register(
        &self,
        acting: &Principal,
        target: Principal,
        name: impl Into<String>,
        credentials: impl Into<String>,
    ) -> Result<()> {
        self.admit(acting)?;

        let record = RoleRecord::new(name, credentials);
        let _guard = self.write_lock.lock();
        let replaced = self.records.contains(&target);
        info!(
            role = %self.role,
            principal = %target,
            name = %record.name,
            replaced,
            "Registered role"
        );
        self.records.set(target, record);
        Ok(())
    }

    /// Deactivate `target`, keeping its record
    pub fn deactivate(&self, acting: &Principal, target: &Principal) -> Result<()> {
        self.admit(acting)?;

        let _guard = self.write_lock.lock();
        let mut record = self
            .records
            .get(target)
            .ok_or_else(|| LedgerError::NotFound(Missing::Role(target.clone())))?;

        if record.active {
            record.active = false;
            self.records.set(target.clone(), record);
            info!(role = %self.role, principal = %target, "Deactivated role");
        }
        Ok(())
    }

    /// Whether `principal` holds an active record (absent is inactive)
    pub fn is_active(&self, principal: &Principal) -> bool {
        self.records
            .get(principal)
            .map(|record| record.active)
            .unwrap_or(false)
    }

    /// Whether `principal` has a record, active or not
    pub fn is_registered(&self, principal: &Principal) -> bool {
        self.records.contains(principal)
    }

    /// Look up the record for `principal`
    pub fn get(&self, principal: &Principal) -> Option<RoleRecord> {
        self.records.get(principal)
    }

    /// Number of records, active or not
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn admit(&self, acting: &Principal) -> Result<()> {
        AdminGate::new(&self.admin).admit(acting).map_err(|err| {
            warn!(
                role = %self.role,
                acting = %acting,
                "Refused role mutation from non-admin principal"
            );
            err
        })
    }
}

impl fmt::Debug for RoleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleRegistry")
            .field("role", &self.role)
            .field("admin", &self.admin)
            .field("records", &self.records.len())
            .finish()
    }
}

//! Authorization checks for gated writes
//!
//! Two gates exist:
//! - **Admin gate**: the acting principal must be the ledger admin. Used for
//!   role registry mutations. No registry lookup.
//! - **Active role gate**: the acting principal must hold an active record in
//!   a role registry. Used for event appends.

use crate::error::{LedgerError, Result};
use crate::roles::RoleRegistry;
use crate::types::Principal;

/// Whether `acting` may perform writes gated on `registry`
pub fn can_write(registry: &RoleRegistry, acting: &Principal) -> bool {
    registry.is_active(acting)
}

/// A check run before a gated write takes effect
///
/// A refusal must leave all state untouched.
pub trait WriteGate {
    /// Admit `acting`, or explain why not
    fn admit(&self, acting: &Principal) -> Result<()>;
}

/// Admits only the admin principal
#[derive(Debug, Clone, Copy)]
pub struct AdminGate<'a> {
    admin: &'a Principal,
}

impl<'a> AdminGate<'a> {
    pub fn new(admin: &'a Principal) -> Self {
        Self { admin }
    }
}

impl WriteGate for AdminGate<'_> {
    fn admit(&self, acting: &Principal) -> Result<()> {
        if acting == self.admin {
            Ok(())
        } else {
            Err(LedgerError::admin_required())
        }
    }
}

/// Admits principals with an active record in a role registry
#[derive(Debug, Clone, Copy)]
pub struct ActiveRoleGate<'a> {
    registry: &'a RoleRegistry,
}

impl<'a> ActiveRoleGate<'a> {
    pub fn new(registry: &'a RoleRegistry) -> Self {
        Self { registry }
    }
}

impl WriteGate for ActiveRoleGate<'_> {
    fn admit(&self, acting: &Principal) -> Result<()> {
        if can_write(self.registry, acting) {
            Ok(())
        } else {
            Err(LedgerError::active_role_required())
        }
    }
}

//! Error types for the provenance ledger

use std::fmt;

use thiserror::Error;

use crate::types::{ItemId, Principal};

/// Result type alias using LedgerError
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors returned by gated writes on the ledger
///
/// Lookups never fail; they return `Option`. Every variant here is a normal,
/// typed outcome and leaves the ledger unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The acting principal failed its gate check
    #[error("Unauthorized: {0}")]
    Unauthorized(UnauthorizedReason),

    /// A write referenced an entity that does not exist
    #[error("Not found: {0}")]
    NotFound(Missing),
}

impl LedgerError {
    /// Shorthand for `Unauthorized(AdminRequired)`
    pub fn admin_required() -> Self {
        LedgerError::Unauthorized(UnauthorizedReason::AdminRequired)
    }

    /// Shorthand for `Unauthorized(ActiveRoleRequired)`
    pub fn active_role_required() -> Self {
        LedgerError::Unauthorized(UnauthorizedReason::ActiveRoleRequired)
    }

    /// Whether this error is an authorization refusal
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, LedgerError::Unauthorized(_))
    }
}

/// Why a gate refused a principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnauthorizedReason {
    /// Only the ledger admin may perform this write
    AdminRequired,
    /// The principal must hold an active role record
    ActiveRoleRequired,
}

impl UnauthorizedReason {
    /// Numeric code used by external protocols (403 / 401)
    pub fn status_code(self) -> u16 {
        match self {
            UnauthorizedReason::AdminRequired => 403,
            UnauthorizedReason::ActiveRoleRequired => 401,
        }
    }
}

impl fmt::Display for UnauthorizedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnauthorizedReason::AdminRequired => f.write_str("admin principal required"),
            UnauthorizedReason::ActiveRoleRequired => f.write_str("active role required"),
        }
    }
}

/// The entity a write expected to find
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Missing {
    /// No item with this identifier has been registered
    Item(ItemId),
    /// No role record exists for this principal
    Role(Principal),
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Missing::Item(id) => write!(f, "item {id}"),
            Missing::Role(principal) => write!(f, "role record for {principal}"),
        }
    }
}

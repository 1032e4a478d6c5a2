//! Records stored by the ledger
//!
//! All records are immutable once written, with one exception: a role
//! record's `active` flag can be cleared by the admin.

use serde::{Deserialize, Serialize};

use crate::types::{Height, ItemId, Principal};

/// Qualification of an expert or restorer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    /// Display name
    pub name: String,

    /// Free-text credentials (degrees, years of practice, ...)
    pub credentials: String,

    /// Whether the principal may currently perform gated writes
    pub active: bool,
}

impl RoleRecord {
    /// Create an active role record
    pub fn new(name: impl Into<String>, credentials: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            credentials: credentials.into(),
            active: true,
        }
    }
}

/// Metadata supplied when registering an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    /// Free-form date or period, e.g. "1750-1780"
    pub creation_date: String,
    pub creator: String,
}

impl NewItem {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        creation_date: impl Into<String>,
        creator: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            creation_date: creation_date.into(),
            creator: creator.into(),
        }
    }
}

/// A registered collectible item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Identifier assigned at registration
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub creation_date: String,
    pub creator: String,
    /// Principal that submitted the registration
    pub registered_by: Principal,
    /// Logical clock value at registration
    pub registration_height: Height,
}

impl Item {
    pub(crate) fn from_new(
        id: ItemId,
        new: NewItem,
        registered_by: Principal,
        registration_height: Height,
    ) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            creation_date: new.creation_date,
            creator: new.creator,
            registered_by,
            registration_height,
        }
    }
}

/// An expert's authentication verdict on an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationEvent {
    pub expert: Principal,
    /// `true` when the expert judged the item authentic
    pub verdict: bool,
    pub notes: String,
    pub height: Height,
}

/// Details of a restoration, as supplied by the restorer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestorationDetails {
    pub description: String,
    /// Unix seconds
    pub date_started: u64,
    /// Unix seconds
    pub date_completed: u64,
    pub techniques_used: String,
    pub materials_used: String,
}

/// A restoration performed on an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestorationEvent {
    pub restorer: Principal,
    pub description: String,
    pub date_started: u64,
    pub date_completed: u64,
    pub techniques_used: String,
    pub materials_used: String,
    pub height: Height,
}

impl RestorationEvent {
    pub(crate) fn from_details(
        restorer: Principal,
        details: RestorationDetails,
        height: Height,
    ) -> Self {
        Self {
            restorer,
            description: details.description,
            date_started: details.date_started,
            date_completed: details.date_completed,
            techniques_used: details.techniques_used,
            materials_used: details.materials_used,
            height,
        }
    }
}

/// Number of restorations recorded for an item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestorationCount {
    pub count: u64,
}

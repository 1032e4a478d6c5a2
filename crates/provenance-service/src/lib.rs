//! Provenance Service
//!
//! HTTP front end for the provenance ledger. The service owns caller
//! identity (the `x-principal` header), the logical clock that stamps every
//! accepted write, and configuration. Ledger rules live in `provenance-core`.
//!
//! ## API Endpoints
//!
//! ### Health
//! - `GET /health` - Liveness check
//! - `GET /ready` - Readiness check with ledger counters
//!
//! ### Roles (`{role}` is `experts` or `restorers`)
//! - `POST /v1/roles/{role}` - Register a principal (admin only)
//! - `GET /v1/roles/{role}/{principal}` - Look up a role record
//! - `POST /v1/roles/{role}/{principal}/deactivate` - Deactivate (admin only)
//!
//! ### Items
//! - `POST /v1/items` - Register an item
//! - `GET /v1/items/last` - Highest identifier assigned
//! - `GET /v1/items/{id}` - Look up an item
//!
//! ### Events
//! - `POST /v1/items/{id}/authentications` - Record a verdict (active expert)
//! - `GET /v1/items/{id}/authentications` - All verdicts, oldest first
//! - `GET /v1/items/{id}/authentication` - Latest verdict
//! - `GET /v1/items/{id}/authentications/{seq}` - One verdict
//! - `POST /v1/items/{id}/restorations` - Record a restoration (active restorer)
//! - `GET /v1/items/{id}/restorations` - All restorations, oldest first
//! - `GET /v1/items/{id}/restorations/count` - Restoration count
//! - `GET /v1/items/{id}/restorations/{seq}` - One restoration

pub mod api;
pub mod clock;
pub mod config;
pub mod state;

pub use api::create_router;
pub use api::error::ApiError;
pub use clock::LogicalClock;
pub use config::{ConfigError, ServiceConfig};
pub use state::AppState;

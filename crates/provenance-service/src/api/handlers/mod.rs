//! API request handlers

pub mod events;
pub mod items;
pub mod roles;

use axum::http::HeaderMap;
use provenance_core::{Principal, Role};

use crate::api::error::ApiError;

pub use events::{
    authenticate_item, authentication_history, get_authentication, get_authentication_at,
    get_restoration, get_restoration_count, record_restoration, restoration_history,
    AuthenticateItemRequest, AuthenticationHistoryResponse, EventAppendedResponse,
    RestorationHistoryResponse,
};
pub use items::{get_item, last_item_id, register_item, LastItemResponse, RegisterItemResponse};
pub use roles::{deactivate_role, get_role, register_role, RegisterRoleRequest, RoleResponse};

/// Header carrying the authenticated caller identity
pub const PRINCIPAL_HEADER: &str = "x-principal";

/// Extract the acting principal from the request headers
pub fn caller(headers: &HeaderMap) -> Result<Principal, ApiError> {
    headers
        .get(PRINCIPAL_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(Principal::from)
        .ok_or(ApiError::MissingPrincipal)
}

/// Path segment naming the registry for `role`
pub fn role_segment(role: Role) -> &'static str {
    match role {
        Role::Expert => "experts",
        Role::Restorer => "restorers",
    }
}

/// Parse the `{role}` path segment (`experts` or `restorers`)
pub fn parse_role(segment: &str) -> Result<Role, ApiError> {
    Role::ALL
        .into_iter()
        .find(|role| role_segment(*role) == segment)
        .ok_or_else(|| {
            let expected: Vec<_> = Role::ALL.into_iter().map(role_segment).collect();
            ApiError::BadRequest(format!(
                "Unknown role '{segment}', expected one of: {}",
                expected.join(", ")
            ))
        })
}

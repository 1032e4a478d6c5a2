//! Role Registry Handlers
//!
//! Admin-only registration and deactivation of experts and restorers, plus
//! public lookup of role records.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use provenance_core::{Principal, Role, RoleRecord};

use super::{caller, parse_role};
use crate::api::error::ApiError;
use crate::state::AppState;

/// Request to register an expert or restorer
#[derive(Debug, Deserialize)]
pub struct RegisterRoleRequest {
    /// Principal receiving the role
    pub principal: Principal,

    /// Display name
    pub name: String,

    /// Free-text credentials
    #[serde(default)]
    pub credentials: String,
}

/// A role record together with its owner
#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub role: Role,
    pub principal: Principal,
    pub record: RoleRecord,
}

impl RoleResponse {
    fn lookup(state: &AppState, role: Role, principal: Principal) -> Result<Self, ApiError> {
        let record = state
            .ledger
            .role_record(role, &principal)
            .ok_or_else(|| ApiError::NotFound(format!("{role} {principal}")))?;

        Ok(Self {
            role,
            principal,
            record,
        })
    }
}

/// Register a principal in a role registry
///
/// POST /v1/roles/{role}
pub async fn register_role(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(role): Path<String>,
    Json(request): Json<RegisterRoleRequest>,
) -> Result<Json<RoleResponse>, ApiError> {
    let acting = caller(&headers)?;
    let role = parse_role(&role)?;

    if request.principal.as_str().trim().is_empty() {
        return Err(ApiError::BadRequest("principal must not be empty".into()));
    }

    state
        .ledger
        .register_role(
            role,
            &acting,
            request.principal.clone(),
            request.name,
            request.credentials,
        )
        .map_err(|e| {
            warn!(role = %role, acting = %acting, error = %e, "Role registration refused");
            ApiError::from(e)
        })?;

    info!(role = %role, principal = %request.principal, "Role registered");

    RoleResponse::lookup(&state, role, request.principal).map(Json)
}

/// Deactivate a principal's role record
///
/// POST /v1/roles/{role}/{principal}/deactivate
pub async fn deactivate_role(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path((role, principal)): Path<(String, String)>,
) -> Result<Json<RoleResponse>, ApiError> {
    let acting = caller(&headers)?;
    let role = parse_role(&role)?;
    let target = Principal::new(principal);

    state
        .ledger
        .deactivate_role(role, &acting, &target)
        .map_err(|e| {
            warn!(role = %role, target = %target, error = %e, "Role deactivation refused");
            ApiError::from(e)
        })?;

    info!(role = %role, principal = %target, "Role deactivated");

    RoleResponse::lookup(&state, role, target).map(Json)
}

/// Look up a role record
///
/// GET /v1/roles/{role}/{principal}
pub async fn get_role(
    State(state): State<Arc<AppState>>,
    Path((role, principal)): Path<(String, String)>,
) -> Result<Json<RoleResponse>, ApiError> {
    let role = parse_role(&role)?;
    RoleResponse::lookup(&state, role, Principal::new(principal)).map(Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::test_support::{headers, state, ADMIN, EXPERT, RESTORER};

    fn request(principal: &str) -> RegisterRoleRequest {
        RegisterRoleRequest {
            principal: Principal::from(principal),
            name: "Dr. Jane Smith".into(),
            credentials: "PhD in Art History, 15 years experience".into(),
        }
    }

    #[tokio::test]
    async fn test_admin_registers_expert() {
        let state = state();

        let Json(response) = register_role(
            State(state.clone()),
            headers(ADMIN),
            Path("experts".into()),
            Json(request(EXPERT)),
        )
        .await
        .unwrap();

        assert_eq!(response.role, Role::Expert);
        assert_eq!(response.principal, Principal::from(EXPERT));
        assert_eq!(response.record.name, "Dr. Jane Smith");
        assert!(response.record.active);
        assert!(state.ledger.is_expert(&Principal::from(EXPERT)));
    }

    #[tokio::test]
    async fn test_non_admin_is_forbidden() {
        let state = state();

        let result = register_role(
            State(state.clone()),
            headers(EXPERT),
            Path("restorers".into()),
            Json(request(RESTORER)),
        )
        .await;

        assert_eq!(result.unwrap_err(), ApiError::AdminRequired);
        assert!(!state.ledger.is_approved_restorer(&Principal::from(RESTORER)));
    }

    #[tokio::test]
    async fn test_missing_principal_header() {
        let result = register_role(
            State(state()),
            HeaderMap::new(),
            Path("experts".into()),
            Json(request(EXPERT)),
        )
        .await;

        assert_eq!(result.unwrap_err(), ApiError::MissingPrincipal);
    }

    #[tokio::test]
    async fn test_unknown_role_segment() {
        let result = register_role(
            State(state()),
            headers(ADMIN),
            Path("curators".into()),
            Json(request(EXPERT)),
        )
        .await;

        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_deactivate_then_lookup() {
        let state = state();
        register_role(
            State(state.clone()),
            headers(ADMIN),
            Path("restorers".into()),
            Json(request(RESTORER)),
        )
        .await
        .unwrap();

        let Json(response) = deactivate_role(
            State(state.clone()),
            headers(ADMIN),
            Path(("restorers".into(), RESTORER.into())),
        )
        .await
        .unwrap();
        assert!(!response.record.active);

        let Json(response) =
            get_role(State(state.clone()), Path(("restorers".into(), RESTORER.into())))
                .await
                .unwrap();
        assert!(!response.record.active);
    }

    #[tokio::test]
    async fn test_deactivate_unknown_principal() {
        let result = deactivate_role(
            State(state()),
            headers(ADMIN),
            Path(("experts".into(), EXPERT.into())),
        )
        .await;

        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_unregistered_role() {
        let result = get_role(State(state()), Path(("experts".into(), EXPERT.into()))).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }
}

//! Event Log Handlers
//!
//! Authentication verdicts and restorations. Writes are stamped with the
//! next clock height and pass the ledger's event gate: the caller must hold
//! an active role, then the item must exist.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use provenance_core::{
    AuthenticationEvent, Height, ItemId, RestorationCount, RestorationDetails, RestorationEvent,
    SequenceNumber,
};

use super::caller;
use crate::api::error::ApiError;
use crate::state::AppState;

/// Request to record an authentication verdict
#[derive(Debug, Deserialize)]
pub struct AuthenticateItemRequest {
    /// `true` when the item is judged authentic
    pub verdict: bool,

    #[serde(default)]
    pub notes: String,
}

/// Response from any event append
#[derive(Debug, Serialize)]
pub struct EventAppendedResponse {
    pub item_id: ItemId,
    /// Sequence number assigned to the event
    pub sequence: SequenceNumber,
    pub height: Height,
}

#[derive(Debug, Serialize)]
pub struct AuthenticationHistoryResponse {
    pub item_id: ItemId,
    pub authentications: Vec<AuthenticationEvent>,
}

#[derive(Debug, Serialize)]
pub struct RestorationHistoryResponse {
    pub item_id: ItemId,
    pub restorations: Vec<RestorationEvent>,
}

fn event_not_found(kind: &str, item_id: ItemId, sequence: Option<SequenceNumber>) -> ApiError {
    match sequence {
        Some(sequence) => ApiError::NotFound(format!("{kind} {sequence} for item {item_id}")),
        None => ApiError::NotFound(format!("{kind} for item {item_id}")),
    }
}

// =============================================================================
// Authentications
// =============================================================================

/// Record an expert's verdict on an item
///
/// POST /v1/items/{id}/authentications
pub async fn authenticate_item(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(item_id): Path<ItemId>,
    Json(request): Json<AuthenticateItemRequest>,
) -> Result<Json<EventAppendedResponse>, ApiError> {
    let acting = caller(&headers)?;
    let AuthenticateItemRequest { verdict, notes } = request;
    let (height, result) = state.stamped(|height| {
        state
            .ledger
            .authenticate_item(&acting, item_id, verdict, notes, height)
    });

    let sequence = result.map_err(|e| {
        warn!(item_id, expert = %acting, error = %e, "Authentication refused");
        ApiError::from(e)
    })?;

    info!(
        item_id,
        sequence,
        expert = %acting,
        verdict,
        height,
        "Authentication recorded"
    );

    Ok(Json(EventAppendedResponse {
        item_id,
        sequence,
        height,
    }))
}

/// Latest verdict for an item
///
/// GET /v1/items/{id}/authentication
pub async fn get_authentication(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<ItemId>,
) -> Result<Json<AuthenticationEvent>, ApiError> {
    state
        .ledger
        .get_authentication(item_id)
        .map(Json)
        .ok_or_else(|| event_not_found("authentication", item_id, None))
}

/// GET /v1/items/{id}/authentications/{seq}
pub async fn get_authentication_at(
    State(state): State<Arc<AppState>>,
    Path((item_id, sequence)): Path<(ItemId, SequenceNumber)>,
) -> Result<Json<AuthenticationEvent>, ApiError> {
    state
        .ledger
        .get_authentication_at(item_id, sequence)
        .map(Json)
        .ok_or_else(|| event_not_found("authentication", item_id, Some(sequence)))
}

/// GET /v1/items/{id}/authentications
pub async fn authentication_history(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<ItemId>,
) -> Json<AuthenticationHistoryResponse> {
    Json(AuthenticationHistoryResponse {
        item_id,
        authentications: state.ledger.authentication_history(item_id),
    })
}

// =============================================================================
// Restorations
// =============================================================================

/// Record a restoration performed by the caller
///
/// POST /v1/items/{id}/restorations
pub async fn record_restoration(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(item_id): Path<ItemId>,
    Json(details): Json<RestorationDetails>,
) -> Result<Json<EventAppendedResponse>, ApiError> {
    let acting = caller(&headers)?;

    if details.date_completed < details.date_started {
        return Err(ApiError::BadRequest(
            "date_completed must not precede date_started".into(),
        ));
    }

    let (height, result) =
        state.stamped(|height| state.ledger.record_restoration(&acting, item_id, details, height));

    let sequence = result.map_err(|e| {
        warn!(item_id, restorer = %acting, error = %e, "Restoration refused");
        ApiError::from(e)
    })?;

    info!(item_id, sequence, restorer = %acting, height, "Restoration recorded");

    Ok(Json(EventAppendedResponse {
        item_id,
        sequence,
        height,
    }))
}

/// GET /v1/items/{id}/restorations/{seq}
pub async fn get_restoration(
    State(state): State<Arc<AppState>>,
    Path((item_id, sequence)): Path<(ItemId, SequenceNumber)>,
) -> Result<Json<RestorationEvent>, ApiError> {
    state
        .ledger
        .get_restoration(item_id, sequence)
        .map(Json)
        .ok_or_else(|| event_not_found("restoration", item_id, Some(sequence)))
}

/// GET /v1/items/{id}/restorations/count
pub async fn get_restoration_count(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<ItemId>,
) -> Json<RestorationCount> {
    Json(state.ledger.get_restoration_count(item_id))
}

/// GET /v1/items/{id}/restorations
pub async fn restoration_history(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<ItemId>,
) -> Json<RestorationHistoryResponse> {
    Json(RestorationHistoryResponse {
        item_id,
        restorations: state.ledger.restoration_history(item_id),
    })
}

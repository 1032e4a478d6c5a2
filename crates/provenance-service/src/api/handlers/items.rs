//! Item Registry Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::Serialize;
use tracing::info;

use provenance_core::{Height, Item, ItemId, NewItem};

use super::caller;
use crate::api::error::ApiError;
use crate::state::AppState;

/// Response from item registration
#[derive(Debug, Serialize)]
pub struct RegisterItemResponse {
    /// Identifier assigned to the item
    pub id: ItemId,
    /// Height stamped on the registration
    pub height: Height,
}

/// Highest item identifier assigned so far
#[derive(Debug, Serialize)]
pub struct LastItemResponse {
    pub last_item_id: ItemId,
}

/// Register a new item
///
/// POST /v1/items
///
/// Open to any identified caller.
pub async fn register_item(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<NewItem>,
) -> Result<Json<RegisterItemResponse>, ApiError> {
    let acting = caller(&headers)?;

    if request.name.trim().is_empty() {
        return Err(ApiError::BadRequest("item name must not be empty".into()));
    }

    let (height, id) =
        state.stamped(|height| state.ledger.register_item(&acting, request, height));

    info!(item_id = id, registered_by = %acting, height, "Item registered");

    Ok(Json(RegisterItemResponse { id, height }))
}

/// GET /v1/items/last
pub async fn last_item_id(State(state): State<Arc<AppState>>) -> Json<LastItemResponse> {
    Json(LastItemResponse {
        last_item_id: state.ledger.last_item_id(),
    })
}

/// GET /v1/items/{id}
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<ItemId>,
) -> Result<Json<Item>, ApiError> {
    state
        .ledger
        .get_item(item_id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("item {item_id}")))
}

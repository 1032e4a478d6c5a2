//! API module for the provenance service

pub mod error;
pub mod handlers;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use provenance_core::{Height, ItemId, Principal};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Readiness check response
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub name: String,
    pub admin: Principal,
    pub last_item_id: ItemId,
    pub height: Height,
}

/// Health check endpoint
///
/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Readiness check endpoint
///
/// GET /ready
pub async fn ready(State(state): State<Arc<AppState>>) -> Json<ReadyResponse> {
    Json(ReadyResponse {
        ready: true,
        name: state.config.name.clone(),
        admin: state.ledger.admin().clone(),
        last_item_id: state.ledger.last_item_id(),
        height: state.clock.current(),
    })
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration for browser-based clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health endpoints
        .route("/health", get(health))
        .route("/ready", get(ready))
        // Role endpoints
        .route("/v1/roles/{role}", post(handlers::register_role))
        .route("/v1/roles/{role}/{principal}", get(handlers::get_role))
        .route(
            "/v1/roles/{role}/{principal}/deactivate",
            post(handlers::deactivate_role),
        )
        // Item endpoints
        .route("/v1/items", post(handlers::register_item))
        .route("/v1/items/last", get(handlers::last_item_id))
        .route("/v1/items/{id}", get(handlers::get_item))
        // Authentication endpoints
        .route(
            "/v1/items/{id}/authentications",
            post(handlers::authenticate_item).get(handlers::authentication_history),
        )
        .route("/v1/items/{id}/authentication", get(handlers::get_authentication))
        .route(
            "/v1/items/{id}/authentications/{seq}",
            get(handlers::get_authentication_at),
        )
        // Restoration endpoints
        .route(
            "/v1/items/{id}/restorations",
            post(handlers::record_restoration).get(handlers::restoration_history),
        )
        .route(
            "/v1/items/{id}/restorations/count",
            get(handlers::get_restoration_count),
        )
        .route("/v1/items/{id}/restorations/{seq}", get(handlers::get_restoration))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

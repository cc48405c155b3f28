//! Service catalog API handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::domain::{Actor, ServiceAddon};
use crate::registry::ServiceDraft;
use crate::utils::{AppError, AppResult};

/// List the full catalog
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ServiceAddon>>> {
    let services = state.services.find_all().await?;
    Ok(Json(services))
}

/// List active services only
pub async fn list_active(State(state): State<ServerState>) -> AppResult<Json<Vec<ServiceAddon>>> {
    let services = state.services.find_active().await?;
    Ok(Json(services))
}

/// Get service by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ServiceAddon>> {
    let service = state
        .services
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Service {} not found", id)))?;
    Ok(Json(service))
}

/// Create a catalog service
pub async fn create(
    State(state): State<ServerState>,
    actor: Actor,
    Json(draft): Json<ServiceDraft>,
) -> AppResult<Json<ServiceAddon>> {
    let service = state.services.create(draft, &actor).await?;
    Ok(Json(service))
}

/// Update a catalog service
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    actor: Actor,
    Json(draft): Json<ServiceDraft>,
) -> AppResult<Json<ServiceAddon>> {
    let service = state.services.update(id, draft, &actor).await?;
    Ok(Json(service))
}

/// Delete a catalog service
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    actor: Actor,
) -> AppResult<Json<serde_json::Value>> {
    state.services.delete(id, &actor).await?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}

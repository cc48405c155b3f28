//! Room API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::domain::{Actor, Room, RoomStatus};
use crate::registry::{RoomCounts, RoomDraft};
use crate::utils::{AppError, AppResult};

/// List all rooms
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Room>>> {
    let rooms = state.rooms.find_all().await?;
    Ok(Json(rooms))
}

/// List rooms bookable today
pub async fn list_available(State(state): State<ServerState>) -> AppResult<Json<Vec<Room>>> {
    let rooms = state.rooms.available_rooms().await?;
    Ok(Json(rooms))
}

/// Occupancy counters for the dashboard
pub async fn counts(State(state): State<ServerState>) -> AppResult<Json<RoomCounts>> {
    let counts = state.rooms.counts().await?;
    Ok(Json(counts))
}

/// Get room by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Room>> {
    let room = state
        .rooms
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Room {} not found", id)))?;
    Ok(Json(room))
}

/// Create a room
pub async fn create(
    State(state): State<ServerState>,
    actor: Actor,
    Json(draft): Json<RoomDraft>,
) -> AppResult<Json<Room>> {
    let room = state.rooms.create(draft, &actor).await?;
    Ok(Json(room))
}

/// Update a room
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    actor: Actor,
    Json(draft): Json<RoomDraft>,
) -> AppResult<Json<Room>> {
    let room = state.rooms.update(id, draft, &actor).await?;
    Ok(Json(room))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: RoomStatus,
}

/// Override a room's status (maintenance on/off)
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    actor: Actor,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<Room>> {
    let room = state.rooms.update_status(id, payload.status, &actor).await?;
    Ok(Json(room))
}

/// Delete a room (cascades to its reservations)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    actor: Actor,
) -> AppResult<Json<serde_json::Value>> {
    state.rooms.delete(id, &actor).await?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}

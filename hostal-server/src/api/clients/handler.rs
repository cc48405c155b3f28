//! Client API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::domain::{Actor, Client, Reservation};
use crate::registry::{ClientDraft, ClientPage};
use crate::utils::{AppError, AppResult};

/// Query params for the paginated client search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub offset: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    20
}

/// List all clients
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Client>>> {
    let clients = state.clients.find_all().await?;
    Ok(Json(clients))
}

/// Paginated substring search by national id or name
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ClientPage>> {
    let page = state
        .clients
        .search(&query.q, query.offset, query.limit)
        .await?;
    Ok(Json(page))
}

/// Get client by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Client>> {
    let client = state
        .clients
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Client {} not found", id)))?;
    Ok(Json(client))
}

/// Get client by national id
pub async fn get_by_national_id(
    State(state): State<ServerState>,
    Path(national_id): Path<String>,
) -> AppResult<Json<Client>> {
    let client = state
        .clients
        .find_by_national_id(&national_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Client with national id {} not found", national_id))
        })?;
    Ok(Json(client))
}

/// The client's reservations
pub async fn reservations(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = state.engine.find_by_client(id).await?;
    Ok(Json(reservations))
}

/// Create a client
pub async fn create(
    State(state): State<ServerState>,
    actor: Actor,
    Json(draft): Json<ClientDraft>,
) -> AppResult<Json<Client>> {
    let client = state.clients.create(draft, &actor).await?;
    Ok(Json(client))
}

/// Update a client
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    actor: Actor,
    Json(draft): Json<ClientDraft>,
) -> AppResult<Json<Client>> {
    let client = state.clients.update(id, draft, &actor).await?;
    Ok(Json(client))
}

/// Delete a client; 409 with the blocking reservation summaries when any of
/// its reservations is still PENDING or ACTIVE.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    actor: Actor,
) -> AppResult<Json<serde_json::Value>> {
    state.clients.delete(id, &actor).await?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}

//! Reservation API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::booking::engine::ReservationTotals;
use crate::booking::{CostQuote, ReservationDraft};
use crate::core::ServerState;
use crate::domain::{Actor, Reservation};
use crate::utils::{AppError, AppResult};

/// Query params for quotes and availability probes
#[derive(Debug, Deserialize)]
pub struct StayQuery {
    pub room_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Reservation id to exclude when probing for an update
    pub exclude: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
    pub conflicts: Vec<Reservation>,
}

#[derive(Debug, Deserialize)]
pub struct AssignServicesRequest {
    #[serde(default)]
    pub service_ids: Vec<i64>,
    #[serde(default)]
    pub options: Vec<String>,
}

/// List all reservations
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = state.engine.find_all().await?;
    Ok(Json(reservations))
}

/// Get reservation by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Reservation>> {
    let reservation = state
        .engine
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))?;
    Ok(Json(reservation))
}

/// Create a reservation
pub async fn create(
    State(state): State<ServerState>,
    actor: Actor,
    Json(mut draft): Json<ReservationDraft>,
) -> AppResult<Json<Reservation>> {
    draft.id = None;
    let reservation = state.engine.create_or_update(draft, &actor).await?;
    Ok(Json(reservation))
}

/// Update a reservation
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    actor: Actor,
    Json(mut draft): Json<ReservationDraft>,
) -> AppResult<Json<Reservation>> {
    draft.id = Some(id);
    let reservation = state.engine.create_or_update(draft, &actor).await?;
    Ok(Json(reservation))
}

/// Cancel a reservation (staff only; refused once a payment is attached)
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    actor: Actor,
) -> AppResult<Json<Reservation>> {
    if !actor.is_authenticated() {
        return Err(AppError::Unauthorized);
    }
    let reservation = state.engine.cancel(id, &actor).await?;
    Ok(Json(reservation))
}

/// Finalize a reservation (no-op when already finalized)
pub async fn finalize(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    actor: Actor,
) -> AppResult<Json<Reservation>> {
    let reservation = state.engine.finalize(id, &actor).await?;
    Ok(Json(reservation))
}

/// Physically delete a reservation
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    actor: Actor,
) -> AppResult<Json<serde_json::Value>> {
    if !state.engine.delete(id, &actor).await? {
        return Err(AppError::NotFound(format!("Reservation {} not found", id)));
    }
    Ok(Json(serde_json::json!({ "deleted": id })))
}

/// Replace the reservation's service set and options
pub async fn assign_services(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    actor: Actor,
    Json(payload): Json<AssignServicesRequest>,
) -> AppResult<Json<Reservation>> {
    let reservation = state
        .engine
        .assign_services(id, &payload.service_ids, &payload.options, &actor)
        .await?;
    Ok(Json(reservation))
}

/// Cost quote for a prospective stay
pub async fn quote(
    State(state): State<ServerState>,
    Query(query): Query<StayQuery>,
) -> AppResult<Json<CostQuote>> {
    let quote = state
        .engine
        .quote(query.room_id, query.start_date, query.end_date)
        .await?;
    Ok(Json(quote))
}

/// Availability probe for a room and date range
pub async fn availability(
    State(state): State<ServerState>,
    Query(query): Query<StayQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let conflicts = state
        .engine
        .availability()
        .find_conflicts(query.room_id, query.start_date, query.end_date, query.exclude)
        .await?;
    Ok(Json(AvailabilityResponse {
        available: conflicts.is_empty(),
        conflicts,
    }))
}

/// Running totals
pub async fn totals(State(state): State<ServerState>) -> AppResult<Json<ReservationTotals>> {
    let totals = state.engine.totals().await?;
    Ok(Json(totals))
}

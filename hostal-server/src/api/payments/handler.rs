//! Payment API handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::domain::{Actor, Payment};
use crate::ledger::{PaymentOutcome, PaymentRequest};
use crate::utils::{AppError, AppResult};

/// Process a payment for a reservation (idempotent by reservation)
pub async fn process(
    State(state): State<ServerState>,
    actor: Actor,
    Json(request): Json<PaymentRequest>,
) -> AppResult<Json<PaymentOutcome>> {
    let outcome = state.ledger.process(request, &actor).await?;
    Ok(Json(outcome))
}

/// Get the payment recorded for a reservation
pub async fn get_by_reservation(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Payment>> {
    let payment = state
        .ledger
        .find_by_reservation(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No payment for reservation {}", id)))?;
    Ok(Json(payment))
}

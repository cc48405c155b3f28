//! Reports API handlers

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::booking::engine::{DailyIncome, DailyMovements, ReservationTotals};
use crate::core::ServerState;
use crate::registry::RoomCounts;
use crate::utils::{AppError, AppResult};

/// Inclusive date-range query
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl RangeQuery {
    fn check(&self) -> AppResult<()> {
        if self.end_date < self.start_date {
            return Err(AppError::Validation(
                "The end date cannot be before the start date".into(),
            ));
        }
        Ok(())
    }
}

/// Dashboard summary: reservation totals plus room occupancy counters
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub reservations: ReservationTotals,
    pub rooms: RoomCounts,
}

/// GET /api/reports/income - income per day over a range
pub async fn income(
    State(state): State<ServerState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<Vec<DailyIncome>>> {
    query.check()?;
    let report = state
        .engine
        .income_by_day(query.start_date, query.end_date)
        .await?;
    Ok(Json(report))
}

/// GET /api/reports/movements - check-ins/check-outs per day over a range
pub async fn movements(
    State(state): State<ServerState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<Vec<DailyMovements>>> {
    query.check()?;
    let report = state
        .engine
        .movements_by_day(query.start_date, query.end_date)
        .await?;
    Ok(Json(report))
}

/// GET /api/reports/summary - running totals for the dashboard
pub async fn summary(State(state): State<ServerState>) -> AppResult<Json<SummaryResponse>> {
    let reservations = state.engine.totals().await?;
    let rooms = state.rooms.counts().await?;
    Ok(Json(SummaryResponse {
        reservations,
        rooms,
    }))
}

//! Availability checker
//!
//! Read-only conflict detection over the reservation store. A conflict is
//! another PENDING/ACTIVE reservation on the same room whose date range
//! overlaps the queried one under the half-open rule
//! `existing.start < query.end && query.start < existing.end`. Back-to-back
//! checkout/check-in on the same day is not a conflict.

use std::sync::Arc;

use chrono::NaiveDate;

use super::error::EngineResult;
use crate::domain::Reservation;
use crate::store::ReservationStore;

#[derive(Clone)]
pub struct AvailabilityChecker {
    reservations: Arc<dyn ReservationStore>,
}

impl AvailabilityChecker {
    pub fn new(reservations: Arc<dyn ReservationStore>) -> Self {
        Self { reservations }
    }

    /// Whether any conflicting reservation exists. `exclude` skips the
    /// reservation's own id so an update can check against all others.
    pub async fn has_conflict(
        &self,
        room_id: i64,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<i64>,
    ) -> EngineResult<bool> {
        Ok(self
            .reservations
            .has_conflict(room_id, start, end, exclude)
            .await?)
    }

    /// The conflicting reservations themselves, for diagnostics and UI hints.
    pub async fn find_conflicts(
        &self,
        room_id: i64,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<i64>,
    ) -> EngineResult<Vec<Reservation>> {
        Ok(self
            .reservations
            .find_conflicts(room_id, start, end, exclude)
            .await?)
    }
}

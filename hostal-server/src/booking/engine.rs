//! Reservation engine
//!
//! Owns the reservation state machine: creation/update with validation,
//! explicit transitions (cancel, finalize), service assignment, pricing and
//! the room-status side effect of every transition.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::availability::AvailabilityChecker;
use super::error::{EngineError, EngineResult};
use super::sync;
use crate::audit::AuditTrail;
use crate::domain::{
    Actor, AuditAction, Reservation, ReservationStatus, Role, RoomStatus,
};
use crate::store::{ClientStore, ReservationStore, RoomStore, ServiceStore};
use crate::utils::Clock;

/// Default check-in / check-out times when a draft does not specify them.
const DEFAULT_CHECK_IN: (u32, u32) = (14, 0);
const DEFAULT_CHECK_OUT: (u32, u32) = (12, 0);

// =============================================================================
// Pricing
// =============================================================================

/// Stay length in days, floored to 1 so a same-day span still bills one
/// night. Note: `create_or_update` rejects equal start/end dates outright;
/// the floor only matters for callers of the calculator itself.
pub fn calculate_stay_days(start: NaiveDate, end: NaiveDate) -> i64 {
    let days = (end - start).num_days();
    if days == 0 { 1 } else { days }
}

/// nightly rate × days, exact decimal arithmetic.
pub fn calculate_total(nightly_rate: Decimal, days: i64) -> Decimal {
    nightly_rate * Decimal::from(days)
}

/// Cost quote for a prospective stay
#[derive(Debug, Clone, Serialize)]
pub struct CostQuote {
    pub days: i64,
    pub total: Decimal,
}

// =============================================================================
// Draft input
// =============================================================================

/// Input for `create_or_update`. An absent id creates a new reservation; a
/// present id updates the existing one (dates, room, status), keeping its
/// services and payment link.
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationDraft {
    pub id: Option<i64>,
    pub client_id: i64,
    pub room_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
    pub status: Option<ReservationStatus>,
}

// =============================================================================
// Reporting types
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct DailyIncome {
    pub date: NaiveDate,
    pub income: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyMovements {
    pub date: NaiveDate,
    pub check_ins: u64,
    pub check_outs: u64,
}

/// Running totals for the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct ReservationTotals {
    pub total_reservations: u64,
    /// Sum of reservation totals over PENDING + ACTIVE + FINALIZED
    pub income: Decimal,
    pub pending: u64,
    pub active: u64,
    pub finalized: u64,
    pub cancelled: u64,
    pub check_ins_today: u64,
    pub check_outs_today: u64,
}

// =============================================================================
// Engine
// =============================================================================

#[derive(Clone)]
pub struct ReservationEngine {
    rooms: Arc<dyn RoomStore>,
    clients: Arc<dyn ClientStore>,
    reservations: Arc<dyn ReservationStore>,
    services: Arc<dyn ServiceStore>,
    availability: AvailabilityChecker,
    audit: AuditTrail,
    clock: Arc<dyn Clock>,
}

impl ReservationEngine {
    pub fn new(
        rooms: Arc<dyn RoomStore>,
        clients: Arc<dyn ClientStore>,
        reservations: Arc<dyn ReservationStore>,
        services: Arc<dyn ServiceStore>,
        audit: AuditTrail,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let availability = AvailabilityChecker::new(reservations.clone());
        Self {
            rooms,
            clients,
            reservations,
            services,
            availability,
            audit,
            clock,
        }
    }

    pub fn availability(&self) -> &AvailabilityChecker {
        &self.availability
    }

    // =========================================================================
    // Create / update
    // =========================================================================

    /// Validate and persist a reservation, then synchronize the room status
    /// and audit the action.
    ///
    /// Preconditions, checked in order, each failing fast:
    /// 1. referenced client exists;
    /// 2. `start < end` (equal dates are rejected at creation time even
    ///    though the day calculator floors them to 1);
    /// 3. room exists and is not under maintenance;
    /// 4. no conflicting PENDING/ACTIVE reservation in the range, excluding
    ///    this reservation's own id on update.
    pub async fn create_or_update(
        &self,
        draft: ReservationDraft,
        actor: &Actor,
    ) -> EngineResult<Reservation> {
        let client = self
            .clients
            .find_by_id(draft.client_id)
            .await?
            .ok_or_else(|| {
                EngineError::Validation("The reservation must reference an existing client".into())
            })?;

        if draft.start_date >= draft.end_date {
            return Err(EngineError::Validation(
                "The start date must be before the end date".into(),
            ));
        }

        let room = self.rooms.find_by_id(draft.room_id).await?.ok_or_else(|| {
            EngineError::Validation("The selected room does not exist".into())
        })?;
        if room.status == RoomStatus::Maintenance {
            return Err(EngineError::Validation(
                "The room is under maintenance and cannot be reserved".into(),
            ));
        }

        if self
            .availability
            .has_conflict(room.id, draft.start_date, draft.end_date, draft.id)
            .await?
        {
            let conflicts = self
                .availability
                .find_conflicts(room.id, draft.start_date, draft.end_date, draft.id)
                .await?;
            let mut message =
                "The room is already reserved in the selected date range.".to_string();
            if let Some(conflict) = conflicts.first() {
                message.push_str(&format!(
                    " An existing reservation runs from {} to {} with status {}.",
                    conflict.start_date, conflict.end_date, conflict.status
                ));
            }
            return Err(EngineError::Validation(message));
        }

        // Carry services / payment / departure over from the stored record
        // on update; a draft only owns the fields it exposes.
        let existing = match draft.id {
            Some(id) => Some(self.reservations.find_by_id(id).await?.ok_or_else(|| {
                EngineError::Validation(format!("Reservation {} not found for update", id))
            })?),
            None => None,
        };

        let stay_days = calculate_stay_days(draft.start_date, draft.end_date);
        let total_price = calculate_total(room.nightly_rate, stay_days);

        let status = draft
            .status
            .or(existing.as_ref().map(|r| r.status))
            .unwrap_or(ReservationStatus::Pending);

        let reservation = Reservation {
            id: draft.id.unwrap_or(0),
            client_id: client.id,
            room_id: room.id,
            start_date: draft.start_date,
            end_date: draft.end_date,
            check_in_time: draft
                .check_in_time
                .or(existing.as_ref().map(|r| r.check_in_time))
                .unwrap_or_else(|| default_time(DEFAULT_CHECK_IN)),
            check_out_time: draft
                .check_out_time
                .or(existing.as_ref().map(|r| r.check_out_time))
                .unwrap_or_else(|| default_time(DEFAULT_CHECK_OUT)),
            stay_days,
            total_price,
            status,
            actual_departure: existing.as_ref().and_then(|r| r.actual_departure),
            service_ids: existing
                .as_ref()
                .map(|r| r.service_ids.clone())
                .unwrap_or_default(),
            service_options: existing
                .as_ref()
                .map(|r| r.service_options.clone())
                .unwrap_or_default(),
            payment_id: existing.as_ref().and_then(|r| r.payment_id),
        };

        let saved = self.reservations.save(reservation).await?;

        sync::sync_room_for_reservation(
            &self.rooms,
            &self.audit,
            actor,
            &saved,
            self.clock.today(),
        )
        .await?;

        self.audit
            .record(
                actor,
                AuditAction::ReservationSaved,
                format!(
                    "Reservation created or updated (ID: {}) for client {}",
                    saved.id,
                    client.full_name()
                ),
                "reservation",
                saved.id,
            )
            .await;

        Ok(saved)
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Cancel a reservation. Staff only: a client-role actor is refused, as
    /// is cancelling once a payment is attached (finalize instead). Terminal
    /// reservations admit no further transitions.
    pub async fn cancel(&self, id: i64, actor: &Actor) -> EngineResult<Reservation> {
        let mut reservation = self.require(id).await?;

        if actor.role == Some(Role::Client) {
            return Err(EngineError::IllegalState(
                "You cannot cancel your own reservation. Please contact the front desk to request a cancellation.".into(),
            ));
        }
        if reservation.payment_id.is_some() {
            return Err(EngineError::IllegalState(
                "A reservation with a recorded payment cannot be cancelled. Use finalize instead.".into(),
            ));
        }
        if reservation.status.is_terminal() {
            return Err(EngineError::IllegalState(format!(
                "Reservation {} is already {} and cannot be cancelled",
                id, reservation.status
            )));
        }

        reservation.status = ReservationStatus::Cancelled;
        // The store commits synchronously; once save returns, the state
        // change is durable.
        let cancelled = self.reservations.save(reservation).await?;

        sync::set_room_status(
            &self.rooms,
            &self.audit,
            actor,
            cancelled.room_id,
            RoomStatus::Available,
        )
        .await?;

        self.audit
            .record(
                actor,
                AuditAction::ReservationCancelled,
                format!(
                    "Reservation cancelled by {} (ID: {}).",
                    actor.display_name(),
                    cancelled.id
                ),
                "reservation",
                cancelled.id,
            )
            .await;

        Ok(cancelled)
    }

    /// Finalize a reservation. Already-finalized reservations are a silent
    /// no-op; the actual departure date is stamped once.
    pub async fn finalize(&self, id: i64, actor: &Actor) -> EngineResult<Reservation> {
        let mut reservation = self.require(id).await?;

        if reservation.status == ReservationStatus::Finalized {
            return Ok(reservation);
        }
        if reservation.status == ReservationStatus::Cancelled {
            return Err(EngineError::IllegalState(format!(
                "Reservation {} is cancelled and cannot be finalized",
                id
            )));
        }

        let previous = reservation.status;
        reservation.status = ReservationStatus::Finalized;
        if reservation.actual_departure.is_none() {
            reservation.actual_departure = Some(self.clock.today());
        }
        let finalized = self.reservations.save(reservation).await?;

        sync::set_room_status(
            &self.rooms,
            &self.audit,
            actor,
            finalized.room_id,
            RoomStatus::Available,
        )
        .await?;

        self.audit
            .record(
                actor,
                AuditAction::ReservationFinalized,
                format!(
                    "Reservation finalized (ID: {}) - previous status: {}",
                    finalized.id, previous
                ),
                "reservation",
                finalized.id,
            )
            .await;

        Ok(finalized)
    }

    /// Physically delete a reservation.
    pub async fn delete(&self, id: i64, actor: &Actor) -> EngineResult<bool> {
        if self.reservations.find_by_id(id).await?.is_none() {
            return Ok(false);
        }
        self.reservations.delete(id).await?;
        self.audit
            .record(
                actor,
                AuditAction::ReservationDeleted,
                format!("Reservation (ID: {}) physically deleted.", id),
                "reservation",
                id,
            )
            .await;
        Ok(true)
    }

    /// Replace the reservation's full service set and option map. Options
    /// pair positionally with the resolved services (ascending id order);
    /// surplus options are dropped and unmatched services get no option;
    /// callers must supply options in the same order they list services.
    pub async fn assign_services(
        &self,
        reservation_id: i64,
        service_ids: &[i64],
        options: &[String],
        actor: &Actor,
    ) -> EngineResult<Reservation> {
        let mut reservation = self.require(reservation_id).await?;

        let resolved = self.services.find_by_ids(service_ids).await?;

        reservation.service_ids = resolved.iter().map(|s| s.id).collect();
        let mut chosen = BTreeMap::new();
        for (i, service) in resolved.iter().enumerate() {
            if let Some(option) = options.get(i)
                && !option.is_empty()
            {
                chosen.insert(service.name.clone(), option.clone());
            }
        }
        reservation.service_options = chosen;

        let updated = self.reservations.save(reservation).await?;

        self.audit
            .record(
                actor,
                AuditAction::ReservationServicesAssigned,
                format!("Services updated for reservation ID: {}", updated.id),
                "reservation",
                updated.id,
            )
            .await;

        Ok(updated)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub async fn find_by_id(&self, id: i64) -> EngineResult<Option<Reservation>> {
        Ok(self.reservations.find_by_id(id).await?)
    }

    pub async fn find_all(&self) -> EngineResult<Vec<Reservation>> {
        Ok(self.reservations.find_all().await?)
    }

    pub async fn find_by_client(&self, client_id: i64) -> EngineResult<Vec<Reservation>> {
        Ok(self.reservations.find_by_client(client_id).await?)
    }

    /// Cost quote for a prospective stay on a room.
    pub async fn quote(
        &self,
        room_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<CostQuote> {
        if end < start {
            return Err(EngineError::Validation(
                "The end date cannot be before the start date".into(),
            ));
        }
        let room = self
            .rooms
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("Room {} not found", room_id)))?;

        let days = calculate_stay_days(start, end);
        if days <= 0 {
            return Err(EngineError::Validation("Invalid date range".into()));
        }
        Ok(CostQuote {
            days,
            total: calculate_total(room.nightly_rate, days),
        })
    }

    /// Sum of the attached add-on prices for a reservation.
    pub async fn services_total(&self, reservation: &Reservation) -> EngineResult<Decimal> {
        let services = self.services.find_by_ids(&reservation.service_ids).await?;
        Ok(services.iter().map(|s| s.price).sum())
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Income per day over an inclusive date range, attributed to the
    /// reservation's start date; only ACTIVE and FINALIZED reservations
    /// count, add-on services included.
    pub async fn income_by_day(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<DailyIncome>> {
        let mut per_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
        let mut date = start;
        while date <= end {
            per_day.insert(date, Decimal::ZERO);
            date = date.succ_opt().unwrap_or(date);
        }

        for r in self.reservations.find_all().await? {
            if r.start_date < start || r.start_date > end {
                continue;
            }
            if !matches!(
                r.status,
                ReservationStatus::Active | ReservationStatus::Finalized
            ) {
                continue;
            }
            let total = r.total_price + self.services_total(&r).await?;
            *per_day.entry(r.start_date).or_insert(Decimal::ZERO) += total;
        }

        Ok(per_day
            .into_iter()
            .map(|(date, income)| DailyIncome { date, income })
            .collect())
    }

    /// Check-in / check-out counts per day over an inclusive date range.
    pub async fn movements_by_day(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<DailyMovements>> {
        let mut per_day: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();
        let mut date = start;
        while date <= end {
            per_day.insert(date, (0, 0));
            date = date.succ_opt().unwrap_or(date);
        }

        for r in self.reservations.find_all().await? {
            if let Some(entry) = per_day.get_mut(&r.start_date) {
                entry.0 += 1;
            }
            if let Some(entry) = per_day.get_mut(&r.end_date) {
                entry.1 += 1;
            }
        }

        Ok(per_day
            .into_iter()
            .map(|(date, (check_ins, check_outs))| DailyMovements {
                date,
                check_ins,
                check_outs,
            })
            .collect())
    }

    /// Running totals for the dashboard.
    pub async fn totals(&self) -> EngineResult<ReservationTotals> {
        let all = self.reservations.find_all().await?;
        let today = self.clock.today();

        let income = all
            .iter()
            .filter(|r| !matches!(r.status, ReservationStatus::Cancelled))
            .map(|r| r.total_price)
            .sum();

        Ok(ReservationTotals {
            total_reservations: all.len() as u64,
            income,
            pending: self.reservations.count_by_status(ReservationStatus::Pending).await?,
            active: self.reservations.count_by_status(ReservationStatus::Active).await?,
            finalized: self
                .reservations
                .count_by_status(ReservationStatus::Finalized)
                .await?,
            cancelled: self
                .reservations
                .count_by_status(ReservationStatus::Cancelled)
                .await?,
            check_ins_today: self.reservations.count_by_start_date(today).await?,
            check_outs_today: self.reservations.count_by_end_date(today).await?,
        })
    }

    // =========================================================================
    // Internal
    // =========================================================================

    async fn require(&self, id: i64) -> EngineResult<Reservation> {
        self.reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("Reservation {} not found", id)))
    }
}

fn default_time((h, m): (u32, u32)) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid default time")
}

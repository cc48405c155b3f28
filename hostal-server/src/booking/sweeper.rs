//! Reconciliation sweeper
//!
//! Periodic background pass that re-derives reservation and room state from
//! the wall-clock date, correcting drift between them. This is the system's
//! only self-healing mechanism: request-side mutations are not serialized
//! against it, and any race is corrected on the next cycle.
//!
//! The sweep itself lives on [`Sweeper`] so tests can drive it with a pinned
//! clock; [`SweepScheduler`] owns the hourly loop and the daily deep pass.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, Timelike};
use tokio_util::sync::CancellationToken;

use super::sync;
use crate::audit::AuditTrail;
use crate::domain::{Actor, ReservationStatus, RoomStatus};
use crate::store::{ReservationStore, RoomStore};
use crate::utils::Clock;

/// Outcome of one sweep pass. A second consecutive pass with no intervening
/// mutations reports all zeroes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub finalized: u64,
    pub activated: u64,
    pub rooms_corrected: u64,
}

impl SweepSummary {
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

pub struct Sweeper {
    reservations: Arc<dyn ReservationStore>,
    rooms: Arc<dyn RoomStore>,
    audit: AuditTrail,
    clock: Arc<dyn Clock>,
}

impl Sweeper {
    pub fn new(
        reservations: Arc<dyn ReservationStore>,
        rooms: Arc<dyn RoomStore>,
        audit: AuditTrail,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            reservations,
            rooms,
            audit,
            clock,
        }
    }

    /// One full reconciliation pass: advance overdue states, then correct
    /// room-status drift. Per-item failures are logged and skipped; the pass
    /// itself never aborts.
    pub async fn run_sweep(&self) -> SweepSummary {
        let today = self.clock.today();
        tracing::info!(%today, "Starting reservation/room reconciliation sweep");

        let finalized = self.finalize_overdue().await;
        let activated = self.activate_due().await;
        let rooms_corrected = self.reconcile_rooms().await;

        let summary = SweepSummary {
            finalized,
            activated,
            rooms_corrected,
        };
        tracing::info!(
            finalized = summary.finalized,
            activated = summary.activated,
            rooms_corrected = summary.rooms_corrected,
            "Reconciliation sweep completed"
        );
        summary
    }

    /// ACTIVE/PENDING reservations whose end date has passed → FINALIZED,
    /// releasing the room.
    async fn finalize_overdue(&self) -> u64 {
        let today = self.clock.today();
        let actor = Actor::system();

        let all = match self.reservations.find_all().await {
            Ok(all) => all,
            Err(e) => {
                tracing::error!(error = %e, "Sweep could not list reservations");
                return 0;
            }
        };

        let mut finalized = 0;
        for mut reservation in all {
            if !reservation.status.blocks_availability() || reservation.end_date >= today {
                continue;
            }
            reservation.status = ReservationStatus::Finalized;
            if reservation.actual_departure.is_none() {
                reservation.actual_departure = Some(today);
            }
            let id = reservation.id;
            let end_date = reservation.end_date;
            let room_id = reservation.room_id;
            match self.reservations.save(reservation).await {
                Ok(_) => {
                    if let Err(e) = sync::set_room_status(
                        &self.rooms,
                        &self.audit,
                        &actor,
                        room_id,
                        RoomStatus::Available,
                    )
                    .await
                    {
                        tracing::error!(reservation = id, error = %e, "Failed to release room");
                    }
                    finalized += 1;
                    tracing::info!(
                        reservation = id,
                        %end_date,
                        "Reservation finalized automatically"
                    );
                }
                Err(e) => {
                    tracing::error!(reservation = id, error = %e, "Failed to finalize reservation");
                }
            }
        }
        finalized
    }

    /// PENDING reservations whose start date has arrived → ACTIVE, marking
    /// the room occupied.
    async fn activate_due(&self) -> u64 {
        let today = self.clock.today();
        let actor = Actor::system();

        let pending = match self
            .reservations
            .find_by_status(ReservationStatus::Pending)
            .await
        {
            Ok(pending) => pending,
            Err(e) => {
                tracing::error!(error = %e, "Sweep could not list pending reservations");
                return 0;
            }
        };

        let mut activated = 0;
        for mut reservation in pending {
            if reservation.start_date > today {
                continue;
            }
            reservation.status = ReservationStatus::Active;
            let id = reservation.id;
            let start_date = reservation.start_date;
            let room_id = reservation.room_id;
            match self.reservations.save(reservation).await {
                Ok(_) => {
                    if let Err(e) = sync::set_room_status(
                        &self.rooms,
                        &self.audit,
                        &actor,
                        room_id,
                        RoomStatus::Occupied,
                    )
                    .await
                    {
                        tracing::error!(reservation = id, error = %e, "Failed to occupy room");
                    }
                    activated += 1;
                    tracing::info!(
                        reservation = id,
                        %start_date,
                        "Reservation activated automatically"
                    );
                }
                Err(e) => {
                    tracing::error!(reservation = id, error = %e, "Failed to activate reservation");
                }
            }
        }
        activated
    }

    /// For every room not under maintenance, recompute whether a
    /// PENDING/ACTIVE reservation covers today and correct the stored status
    /// when it disagrees.
    async fn reconcile_rooms(&self) -> u64 {
        let today = self.clock.today();
        let actor = Actor::system();

        let rooms = match self.rooms.find_all().await {
            Ok(rooms) => rooms,
            Err(e) => {
                tracing::error!(error = %e, "Sweep could not list rooms");
                return 0;
            }
        };

        let mut corrected = 0;
        for room in rooms {
            if room.status == RoomStatus::Maintenance {
                continue;
            }
            let covered = match sync::room_covered_on(&self.reservations, room.id, today).await {
                Ok(covered) => covered,
                Err(e) => {
                    tracing::error!(room = room.id, error = %e, "Failed to derive room occupancy");
                    continue;
                }
            };
            let expected = if covered {
                RoomStatus::Occupied
            } else {
                RoomStatus::Available
            };
            if room.status == expected {
                continue;
            }
            match sync::set_room_status(&self.rooms, &self.audit, &actor, room.id, expected).await
            {
                Ok(changed) => {
                    if changed {
                        corrected += 1;
                        tracing::debug!(
                            room = %room.number,
                            from = %room.status,
                            to = %expected,
                            "Room status reconciled"
                        );
                    }
                }
                Err(e) => {
                    tracing::error!(room = room.id, error = %e, "Failed to reconcile room status");
                }
            }
        }
        corrected
    }
}

// =============================================================================
// SweepScheduler
// =============================================================================

/// Background scheduler: an hourly sweep plus a deeper daily pass at a
/// configured local hour. Started from `start_background_tasks()`.
pub struct SweepScheduler {
    sweeper: Sweeper,
    interval: Duration,
    deep_hour: u32,
    shutdown: CancellationToken,
}

impl SweepScheduler {
    pub fn new(
        sweeper: Sweeper,
        interval: Duration,
        deep_hour: u32,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            sweeper,
            interval,
            deep_hour,
            shutdown,
        }
    }

    /// Main loop: startup catch-up sweep, then periodic triggers.
    pub async fn run(self) {
        tracing::info!("Sweep scheduler started");

        // Catch up on whatever drifted while the server was down.
        self.sweeper.run_sweep().await;

        loop {
            let until_deep = Self::duration_until_next_deep(self.deep_hour, Local::now());

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {
                    self.sweeper.run_sweep().await;
                }
                _ = tokio::time::sleep(until_deep) => {
                    tracing::info!("Running daily deep reconciliation pass");
                    self.sweeper.run_sweep().await;
                    // The deep pass re-derives room occupancy a second time
                    // so a mid-sweep race still converges today.
                    self.sweeper.reconcile_rooms().await;
                }
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Sweep scheduler received shutdown signal");
                    return;
                }
            }
        }
    }

    /// Time remaining until the next daily deep pass.
    fn duration_until_next_deep(deep_hour: u32, now: DateTime<Local>) -> Duration {
        let today_target = now
            .date_naive()
            .and_hms_opt(deep_hour.min(23), 0, 0)
            .expect("valid deep-pass time");

        let target = if now.time().hour() >= deep_hour {
            today_target + chrono::Duration::days(1)
        } else {
            today_target
        };

        let delta = target - now.naive_local();
        delta.to_std().unwrap_or(Duration::from_secs(60))
    }
}

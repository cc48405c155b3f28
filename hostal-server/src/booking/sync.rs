//! Room status synchronization
//!
//! Shared by the reservation engine (on every state transition) and the
//! reconciliation sweeper (drift correction). Room status is derived from
//! reservation state; MAINTENANCE is staff-owned and never overwritten here.

use std::sync::Arc;

use chrono::NaiveDate;

use super::error::EngineResult;
use crate::audit::AuditTrail;
use crate::domain::{Actor, AuditAction, Reservation, RoomStatus};
use crate::store::{ReservationStore, RoomStore};

/// Set a room's status, auditing the change. Returns whether anything
/// actually changed. Unknown room ids are ignored.
pub(crate) async fn set_room_status(
    rooms: &Arc<dyn RoomStore>,
    audit: &AuditTrail,
    actor: &Actor,
    room_id: i64,
    status: RoomStatus,
) -> EngineResult<bool> {
    let Some(mut room) = rooms.find_by_id(room_id).await? else {
        return Ok(false);
    };
    if room.status == status {
        return Ok(false);
    }

    let previous = room.status;
    room.status = status;
    let room = rooms.save(room).await?;

    audit
        .record(
            actor,
            AuditAction::RoomStatusChanged,
            format!(
                "Room #{} (ID: {}) status changed from '{}' to '{}'.",
                room.number, room.id, previous, status
            ),
            "room",
            room.id,
        )
        .await;
    Ok(true)
}

/// Apply the room-status side effect of a reservation transition:
/// - PENDING/ACTIVE starting today or earlier → OCCUPIED;
/// - PENDING/ACTIVE starting in the future → AVAILABLE, unless the room is
///   under MAINTENANCE (left untouched);
/// - FINALIZED/CANCELLED → AVAILABLE.
pub(crate) async fn sync_room_for_reservation(
    rooms: &Arc<dyn RoomStore>,
    audit: &AuditTrail,
    actor: &Actor,
    reservation: &Reservation,
    today: NaiveDate,
) -> EngineResult<()> {
    if reservation.status.blocks_availability() {
        if reservation.start_date <= today {
            set_room_status(rooms, audit, actor, reservation.room_id, RoomStatus::Occupied)
                .await?;
        } else if let Some(room) = rooms.find_by_id(reservation.room_id).await?
            && room.status != RoomStatus::Maintenance
        {
            set_room_status(
                rooms,
                audit,
                actor,
                reservation.room_id,
                RoomStatus::Available,
            )
            .await?;
        }
    } else {
        set_room_status(
            rooms,
            audit,
            actor,
            reservation.room_id,
            RoomStatus::Available,
        )
        .await?;
    }
    Ok(())
}

/// Derived occupancy truth for a room: is any PENDING/ACTIVE reservation
/// covering `today`?
pub(crate) async fn room_covered_on(
    reservations: &Arc<dyn ReservationStore>,
    room_id: i64,
    today: NaiveDate,
) -> EngineResult<bool> {
    let on_room = reservations.find_by_room(room_id).await?;
    Ok(on_room
        .iter()
        .any(|r| r.status.blocks_availability() && r.covers(today)))
}

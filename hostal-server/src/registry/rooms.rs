//! Room registry
//!
//! CRUD over the room inventory plus the occupancy counters the dashboard
//! uses. Status changes ride through the booking sync helper so every
//! transition is audited consistently.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::audit::AuditTrail;
use crate::booking::error::{EngineError, EngineResult};
use crate::booking::sync;
use crate::domain::{Actor, AuditAction, Room, RoomStatus};
use crate::store::{ReservationStore, RoomStore};
use crate::utils::Clock;

/// Input for creating or updating a room
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RoomDraft {
    #[validate(length(min = 1, max = 10))]
    pub number: String,
    #[validate(length(min = 1, max = 50))]
    pub room_type: String,
    pub nightly_rate: Decimal,
    pub status: Option<RoomStatus>,
}

/// Inventory counters for the dashboard
#[derive(Debug, Clone, serde::Serialize)]
pub struct RoomCounts {
    pub total: u64,
    pub available: u64,
    pub occupied: u64,
    pub maintenance: u64,
}

#[derive(Clone)]
pub struct RoomRegistry {
    rooms: Arc<dyn RoomStore>,
    reservations: Arc<dyn ReservationStore>,
    audit: AuditTrail,
    clock: Arc<dyn Clock>,
}

impl RoomRegistry {
    pub fn new(
        rooms: Arc<dyn RoomStore>,
        reservations: Arc<dyn ReservationStore>,
        audit: AuditTrail,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            rooms,
            reservations,
            audit,
            clock,
        }
    }

    pub async fn create(&self, draft: RoomDraft, actor: &Actor) -> EngineResult<Room> {
        draft
            .validate()
            .map_err(|e| EngineError::Validation(e.to_string()))?;
        if draft.nightly_rate < Decimal::ZERO {
            return Err(EngineError::Validation(
                "The nightly rate cannot be negative".into(),
            ));
        }
        if self.rooms.find_by_number(&draft.number).await?.is_some() {
            return Err(EngineError::Validation(format!(
                "A room with number '{}' already exists",
                draft.number
            )));
        }

        let room = self
            .rooms
            .save(Room {
                id: 0,
                number: draft.number,
                room_type: draft.room_type,
                nightly_rate: draft.nightly_rate,
                status: draft.status.unwrap_or(RoomStatus::Available),
            })
            .await?;

        self.audit
            .record(
                actor,
                AuditAction::RoomCreated,
                format!(
                    "New room registered: #{} ({}, ${})",
                    room.number, room.room_type, room.nightly_rate
                ),
                "room",
                room.id,
            )
            .await;

        Ok(room)
    }

    pub async fn update(&self, id: i64, draft: RoomDraft, actor: &Actor) -> EngineResult<Room> {
        draft
            .validate()
            .map_err(|e| EngineError::Validation(e.to_string()))?;
        if draft.nightly_rate < Decimal::ZERO {
            return Err(EngineError::Validation(
                "The nightly rate cannot be negative".into(),
            ));
        }
        let mut room = self
            .rooms
            .find_by_id(id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("Room {} not found", id)))?;

        if room.number != draft.number
            && let Some(other) = self.rooms.find_by_number(&draft.number).await?
            && other.id != room.id
        {
            return Err(EngineError::Validation(format!(
                "Room number '{}' is already in use",
                draft.number
            )));
        }

        room.number = draft.number;
        room.room_type = draft.room_type;
        room.nightly_rate = draft.nightly_rate;
        if let Some(status) = draft.status {
            room.status = status;
        }
        let room = self.rooms.save(room).await?;

        self.audit
            .record(
                actor,
                AuditAction::RoomUpdated,
                format!(
                    "Room #{} (ID: {}) updated. Current status: {}",
                    room.number, room.id, room.status
                ),
                "room",
                room.id,
            )
            .await;

        Ok(room)
    }

    /// Staff-driven status override (typically MAINTENANCE on/off).
    pub async fn update_status(
        &self,
        id: i64,
        status: RoomStatus,
        actor: &Actor,
    ) -> EngineResult<Room> {
        if self.rooms.find_by_id(id).await?.is_none() {
            return Err(EngineError::NotFound(format!("Room {} not found", id)));
        }
        sync::set_room_status(&self.rooms, &self.audit, actor, id, status).await?;
        self.rooms
            .find_by_id(id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("Room {} not found", id)))
    }

    /// Delete a room, cascading to its reservations first.
    pub async fn delete(&self, id: i64, actor: &Actor) -> EngineResult<()> {
        let room = self
            .rooms
            .find_by_id(id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("Room {} not found", id)))?;

        for reservation in self.reservations.find_by_room(id).await? {
            self.reservations.delete(reservation.id).await?;
        }
        self.rooms.delete(id).await?;

        self.audit
            .record(
                actor,
                AuditAction::RoomDeleted,
                format!("Room #{} (ID: {}) deleted.", room.number, room.id),
                "room",
                room.id,
            )
            .await;

        Ok(())
    }

    pub async fn find_by_id(&self, id: i64) -> EngineResult<Option<Room>> {
        Ok(self.rooms.find_by_id(id).await?)
    }

    pub async fn find_by_number(&self, number: &str) -> EngineResult<Option<Room>> {
        Ok(self.rooms.find_by_number(number).await?)
    }

    pub async fn find_all(&self) -> EngineResult<Vec<Room>> {
        Ok(self.rooms.find_all().await?)
    }

    /// Rooms bookable right now: marked AVAILABLE and not covered today by a
    /// PENDING/ACTIVE reservation. The stored status can lag until the next
    /// sweep, so the derived check filters stale entries out.
    pub async fn available_rooms(&self) -> EngineResult<Vec<Room>> {
        let today = self.clock.today();
        let mut available = Vec::new();
        for room in self.rooms.find_by_status(RoomStatus::Available).await? {
            if !sync::room_covered_on(&self.reservations, room.id, today).await? {
                available.push(room);
            }
        }
        Ok(available)
    }

    /// Occupancy counters; "occupied" is derived (marked OCCUPIED, or
    /// covered today by a PENDING/ACTIVE reservation).
    pub async fn counts(&self) -> EngineResult<RoomCounts> {
        let today = self.clock.today();
        let all = self.rooms.find_all().await?;
        let total = all.len() as u64;
        let maintenance = self.rooms.count_by_status(RoomStatus::Maintenance).await?;

        let mut occupied = 0;
        for room in &all {
            if room.status == RoomStatus::Maintenance {
                continue;
            }
            if room.status == RoomStatus::Occupied
                || sync::room_covered_on(&self.reservations, room.id, today).await?
            {
                occupied += 1;
            }
        }

        Ok(RoomCounts {
            total,
            available: total - occupied - maintenance,
            occupied,
            maintenance,
        })
    }
}

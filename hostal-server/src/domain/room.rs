//! Room entity

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Room occupancy status
///
/// Maintained by the reservation engine and the reconciliation sweeper;
/// MAINTENANCE is the only status set purely by staff action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    Available,
    Occupied,
    Maintenance,
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RoomStatus::Available => "AVAILABLE",
            RoomStatus::Occupied => "OCCUPIED",
            RoomStatus::Maintenance => "MAINTENANCE",
        };
        write!(f, "{}", s)
    }
}

/// Room record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    /// Unique human-readable room number ("101", "202"...)
    pub number: String,
    /// Type label ("Single", "Double", "Suite"...)
    pub room_type: String,
    /// Non-negative nightly rate
    pub nightly_rate: Decimal,
    pub status: RoomStatus,
}

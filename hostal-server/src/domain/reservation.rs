//! Reservation entity and lifecycle states

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reservation lifecycle state
///
/// PENDING and ACTIVE block the room's availability; FINALIZED and CANCELLED
/// are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Active,
    Finalized,
    Cancelled,
}

impl ReservationStatus {
    /// States that occupy the room for conflict detection.
    pub fn blocks_availability(self) -> bool {
        matches!(self, ReservationStatus::Pending | ReservationStatus::Active)
    }

    /// Terminal states admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ReservationStatus::Finalized | ReservationStatus::Cancelled
        )
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::Active => "ACTIVE",
            ReservationStatus::Finalized => "FINALIZED",
            ReservationStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{}", s)
    }
}

/// Reservation record
///
/// Relationships are stored as id references and resolved through the stores
/// when needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub client_id: i64,
    pub room_id: i64,
    /// First night, inclusive
    pub start_date: NaiveDate,
    /// Checkout date, exclusive; must be strictly after `start_date`
    pub end_date: NaiveDate,
    pub check_in_time: NaiveTime,
    pub check_out_time: NaiveTime,
    /// Stay length in days, floored to 1
    pub stay_days: i64,
    /// nightly rate × stay days
    pub total_price: Decimal,
    pub status: ReservationStatus,
    /// Stamped on finalization
    pub actual_departure: Option<NaiveDate>,
    /// Attached optional-service add-ons
    pub service_ids: Vec<i64>,
    /// Chosen option per service name
    pub service_options: BTreeMap<String, String>,
    /// At most one payment per reservation
    pub payment_id: Option<i64>,
}

impl Reservation {
    /// Whether the reservation covers `date` under half-open `[start, end)`
    /// extended to include the checkout day itself, matching how the sweeper
    /// derives "the room is in use today".
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

//! Payment entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Completed,
}

/// One-time payment recorded against a reservation
///
/// `reservation_id` is unique: the ledger refuses to create a second payment
/// for the same reservation and returns the existing reference instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub reservation_id: i64,
    /// Room total (nights × rate) at payment time
    pub base_amount: Decimal,
    /// Sum of the attached add-on service prices
    pub services_amount: Decimal,
    /// base + services, non-negative
    pub total_amount: Decimal,
    pub method: String,
    pub status: PaymentStatus,
    /// Opaque unique reference, e.g. "REF-1754550000000-42"
    pub reference: String,
    pub paid_at: DateTime<Utc>,
    pub channel: String,
}

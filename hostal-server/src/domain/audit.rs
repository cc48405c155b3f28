//! Audit log types
//!
//! Append-only record of administrative actions. Entries are never mutated
//! or deleted by the back office.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audit action type (enum, not free text)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    // ═══ Reservations ═══
    ReservationSaved,
    ReservationCancelled,
    ReservationFinalized,
    ReservationDeleted,
    ReservationServicesAssigned,

    // ═══ Payments ═══
    PaymentProcessed,

    // ═══ Rooms ═══
    RoomCreated,
    RoomUpdated,
    RoomStatusChanged,
    RoomDeleted,

    // ═══ Clients ═══
    ClientCreated,
    ClientUpdated,
    ClientDeleted,

    // ═══ Service catalog ═══
    ServiceCreated,
    ServiceUpdated,
    ServiceDeleted,

    // ═══ Staff ═══
    EmployeeCreated,
    EmployeeUpdated,
    EmployeeDeleted,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Immutable audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    /// Acting staff account; None for system or client-originated events
    pub employee_id: Option<i64>,
    pub employee_name: Option<String>,
    pub action: AuditAction,
    /// Free-text detail
    pub detail: String,
    /// Affected entity type ("reservation", "room", "client"...)
    pub entity_type: String,
    pub entity_id: i64,
}

/// Audit log query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct AuditQuery {
    /// Keyword matched against action and detail
    pub q: Option<String>,
    #[serde(default)]
    pub offset: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

/// Audit log list response
#[derive(Debug, Serialize)]
pub struct AuditPage {
    pub items: Vec<AuditEntry>,
    pub total: u64,
}

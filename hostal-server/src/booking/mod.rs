//! Booking core
//!
//! # Structure
//!
//! - [`availability`] - read-only conflict detection
//! - [`engine`] - reservation state machine, pricing and reporting
//! - [`sweeper`] - periodic reconciliation against the wall clock
//! - [`sync`] - room-status synchronization helpers
//! - [`error`] - engine error taxonomy

pub mod availability;
pub mod engine;
pub mod error;
pub(crate) mod sync;
pub mod sweeper;

pub use availability::AvailabilityChecker;
pub use engine::{
    CostQuote, ReservationDraft, ReservationEngine, calculate_stay_days, calculate_total,
};
pub use error::{BlockingReservation, EngineError, EngineResult};
pub use sweeper::{SweepScheduler, SweepSummary, Sweeper};

#[cfg(test)]
mod tests;

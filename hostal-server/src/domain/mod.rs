//! Domain entities
//!
//! Entities reference each other by id; relationships are resolved through
//! the store interfaces, never held as owning pointers.

pub mod actor;
pub mod audit;
pub mod client;
pub mod employee;
pub mod payment;
pub mod reservation;
pub mod room;
pub mod service;

pub use actor::{Actor, Role};
pub use audit::{AuditAction, AuditEntry, AuditPage, AuditQuery};
pub use client::Client;
pub use employee::Employee;
pub use payment::{Payment, PaymentStatus};
pub use reservation::{Reservation, ReservationStatus};
pub use room::{Room, RoomStatus};
pub use service::ServiceAddon;

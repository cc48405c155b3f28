//! Hostal Server - hotel management back office
//!
//! # Architecture overview
//!
//! - **Booking core** (`booking`): reservation state machine, availability
//!   conflict detection, room-status synchronization and the periodic
//!   reconciliation sweeper
//! - **Stores** (`store`): storage-agnostic interfaces with in-memory
//!   arena implementations
//! - **Registries** (`registry`): room / client / service / employee CRUD
//! - **Payment ledger** (`ledger`): idempotent payment recording
//! - **Audit trail** (`audit`): append-only administrative action log
//! - **HTTP API** (`api`): RESTful interface
//!
//! # Module structure
//!
//! ```text
//! hostal-server/src/
//! ├── core/          # configuration, state, server wiring
//! ├── domain/        # entities and value types
//! ├── store/         # store traits + in-memory arenas
//! ├── booking/       # reservation engine, availability, sweeper
//! ├── ledger/        # payment processing
//! ├── registry/      # CRUD services
//! ├── audit/         # audit recorder
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # errors, logging, clock
//! ```

pub mod api;
pub mod audit;
pub mod booking;
pub mod core;
pub mod domain;
pub mod ledger;
pub mod registry;
pub mod store;
pub mod utils;

// Re-export public types
pub use booking::{AvailabilityChecker, ReservationEngine, SweepScheduler, Sweeper};
pub use core::{Config, Server, ServerState};
pub use ledger::PaymentLedger;
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    __  __           __        __
   / / / /___  _____/ /_____ _/ /
  / /_/ / __ \/ ___/ __/ __ `/ /
 / __  / /_/ (__  ) /_/ /_/ / /
/_/ /_/\____/____/\__/\__,_/_/
    "#
    );
}

//! API routing
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`rooms`] - room inventory
//! - [`clients`] - client registry
//! - [`reservations`] - reservation lifecycle, availability, cost quotes
//! - [`payments`] - payment ledger
//! - [`services`] - optional-service catalog
//! - [`employees`] - staff registry
//! - [`audit_log`] - audit log viewer
//! - [`reports`] - income / movement / summary reporting

pub mod extract;

pub mod audit_log;
pub mod clients;
pub mod employees;
pub mod health;
pub mod payments;
pub mod reports;
pub mod reservations;
pub mod rooms;
pub mod services;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Assemble the full application router.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(rooms::router())
        .merge(clients::router())
        .merge(reservations::router())
        .merge(payments::router())
        .merge(services::router())
        .merge(employees::router())
        .merge(audit_log::router())
        .merge(reports::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

//! Engine error taxonomy
//!
//! Validation, illegal-state and structured-conflict errors are surfaced
//! distinctly so the API layer can render each differently; store failures
//! are wrapped with the cause preserved for logging.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;
use crate::utils::AppError;

/// Summary of a reservation that blocks a client deletion
#[derive(Debug, Clone, Serialize)]
pub struct BlockingReservation {
    pub id: i64,
    pub room_number: String,
    pub status: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    /// Bad input: missing field, malformed range, unknown referenced entity,
    /// room unavailable for the requested range.
    #[error("{0}")]
    Validation(String),

    /// Transition forbidden by the current state (cancel-with-payment,
    /// client self-cancel).
    #[error("{0}")]
    IllegalState(String),

    #[error("{0}")]
    NotFound(String),

    /// Client deletion blocked by non-terminal reservations; carries the
    /// blocking summaries so the caller can render specifics.
    #[error(
        "Client cannot be deleted while a reservation is active. Cancel or finalize the reservation first."
    )]
    ClientHasActiveReservations {
        client_id: i64,
        blocking: Vec<BlockingReservation>,
    },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        let message = err.to_string();
        match err {
            EngineError::Validation(msg) => AppError::Validation(msg),
            EngineError::IllegalState(msg) => AppError::BusinessRule(msg),
            EngineError::NotFound(msg) => AppError::NotFound(msg),
            EngineError::ClientHasActiveReservations { client_id, blocking } => {
                AppError::ConflictDetail {
                    message,
                    detail: serde_json::json!({
                        "client_id": client_id,
                        "blocking_reservations": blocking,
                    }),
                }
            }
            EngineError::Store(e) => AppError::Store(e.to_string()),
        }
    }
}

//! Time helpers: wall-clock access behind a trait
//!
//! The reservation engine and the reconciliation sweeper derive state from
//! "today"; injecting the clock keeps every date-dependent path testable
//! with a pinned date.

use chrono::{DateTime, Local, NaiveDate, Utc};

use super::{AppError, AppResult};

/// Wall-clock source for date-dependent business logic.
pub trait Clock: Send + Sync {
    /// Current instant (UTC).
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date in the server's local timezone.
    fn today(&self) -> NaiveDate;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date format: {}", date)))
}

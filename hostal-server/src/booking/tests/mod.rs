//! Booking core tests
//!
//! The fixtures drive the engine, ledger and sweeper over the in-memory
//! stores with a mutable test clock, so date-dependent transitions can be
//! simulated day by day.

mod test_engine;
mod test_guards;
mod test_payments;

use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::booking::{ReservationDraft, Sweeper};
use crate::core::{Config, ServerState};
use crate::domain::{Actor, Client, ReservationStatus, Role, Room, RoomStatus};
use crate::registry::{ClientDraft, RoomDraft};
use crate::store::{ReservationStore, RoomStore, Stores};
use crate::utils::Clock;

/// Test clock whose date can be moved forward mid-test.
pub(crate) struct TestClock {
    date: Mutex<NaiveDate>,
}

impl TestClock {
    fn new(date: NaiveDate) -> Self {
        Self {
            date: Mutex::new(date),
        }
    }

    pub(crate) fn advance_to(&self, date: NaiveDate) {
        *self.date.lock().unwrap() = date;
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        self.today()
            .and_hms_opt(12, 0, 0)
            .expect("valid test time")
            .and_utc()
    }

    fn today(&self) -> NaiveDate {
        *self.date.lock().unwrap()
    }
}

pub(crate) struct TestApp {
    pub state: ServerState,
    pub clock: Arc<TestClock>,
}

impl TestApp {
    pub(crate) fn sweeper(&self) -> Sweeper {
        Sweeper::new(
            self.state.stores.reservations.clone(),
            self.state.stores.rooms.clone(),
            self.state.audit.clone(),
            self.state.clock.clone(),
        )
    }
}

pub(crate) fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// A fixed "today" every test starts from.
pub(crate) fn today() -> NaiveDate {
    d(2026, 3, 10)
}

pub(crate) fn admin() -> Actor {
    Actor::staff(1, "admin", Role::Admin)
}

pub(crate) fn client_actor() -> Actor {
    Actor {
        id: None,
        username: Some("guest".to_string()),
        role: Some(Role::Client),
    }
}

pub(crate) fn create_test_app() -> TestApp {
    let clock = Arc::new(TestClock::new(today()));
    let state = ServerState::with_stores(Config::default(), Stores::in_memory(), clock.clone());
    TestApp { state, clock }
}

pub(crate) async fn seed_room(app: &TestApp, number: &str, rate: i64) -> Room {
    app.state
        .rooms
        .create(
            RoomDraft {
                number: number.to_string(),
                room_type: "Single".to_string(),
                nightly_rate: Decimal::from(rate),
                status: None,
            },
            &admin(),
        )
        .await
        .unwrap()
}

pub(crate) async fn seed_room_with_status(
    app: &TestApp,
    number: &str,
    rate: i64,
    status: RoomStatus,
) -> Room {
    app.state
        .rooms
        .create(
            RoomDraft {
                number: number.to_string(),
                room_type: "Single".to_string(),
                nightly_rate: Decimal::from(rate),
                status: Some(status),
            },
            &admin(),
        )
        .await
        .unwrap()
}

pub(crate) async fn seed_client(app: &TestApp, national_id: &str) -> Client {
    app.state
        .clients
        .create(
            ClientDraft {
                first_names: "Maria".to_string(),
                last_names: "Lopez".to_string(),
                national_id: national_id.to_string(),
                nationality: None,
                email: None,
                phone: None,
            },
            &admin(),
        )
        .await
        .unwrap()
}

pub(crate) fn draft(
    client_id: i64,
    room_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> ReservationDraft {
    ReservationDraft {
        id: None,
        client_id,
        room_id,
        start_date: start,
        end_date: end,
        check_in_time: None,
        check_out_time: None,
        status: None,
    }
}

/// Shorthand for asserting a reservation's stored status.
pub(crate) async fn stored_status(app: &TestApp, id: i64) -> ReservationStatus {
    app.state
        .stores
        .reservations
        .find_by_id(id)
        .await
        .unwrap()
        .unwrap()
        .status
}

/// Shorthand for asserting a room's stored status.
pub(crate) async fn room_status(app: &TestApp, id: i64) -> RoomStatus {
    app.state
        .stores
        .rooms
        .find_by_id(id)
        .await
        .unwrap()
        .unwrap()
        .status
}

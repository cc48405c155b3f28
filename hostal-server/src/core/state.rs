//! Server state: shared handles for every service
//!
//! `ServerState` wires the stores into the domain services once at startup;
//! request handlers and the sweeper all clone cheap `Arc` handles from it.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;

use crate::audit::AuditTrail;
use crate::booking::{ReservationEngine, SweepScheduler, Sweeper};
use crate::core::Config;
use crate::domain::{Actor, RoomStatus};
use crate::ledger::PaymentLedger;
use crate::registry::{
    ClientRegistry, EmployeeRegistry, RoomDraft, RoomRegistry, ServiceCatalog,
};
use crate::store::{RoomStore as _, Stores};
use crate::utils::{Clock, SystemClock};

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub stores: Stores,
    pub clock: Arc<dyn Clock>,
    pub audit: AuditTrail,
    pub engine: Arc<ReservationEngine>,
    pub ledger: Arc<PaymentLedger>,
    pub rooms: Arc<RoomRegistry>,
    pub clients: Arc<ClientRegistry>,
    pub services: Arc<ServiceCatalog>,
    pub employees: Arc<EmployeeRegistry>,
    shutdown: CancellationToken,
}

impl ServerState {
    /// Wire the domain services over a store set and a clock.
    pub fn with_stores(config: Config, stores: Stores, clock: Arc<dyn Clock>) -> Self {
        let audit = AuditTrail::new(stores.audit.clone(), stores.employees.clone(), clock.clone());

        let engine = Arc::new(ReservationEngine::new(
            stores.rooms.clone(),
            stores.clients.clone(),
            stores.reservations.clone(),
            stores.services.clone(),
            audit.clone(),
            clock.clone(),
        ));
        let ledger = Arc::new(PaymentLedger::new(
            stores.reservations.clone(),
            stores.payments.clone(),
            stores.services.clone(),
            audit.clone(),
            clock.clone(),
        ));
        let rooms = Arc::new(RoomRegistry::new(
            stores.rooms.clone(),
            stores.reservations.clone(),
            audit.clone(),
            clock.clone(),
        ));
        let clients = Arc::new(ClientRegistry::new(
            stores.clients.clone(),
            stores.reservations.clone(),
            stores.rooms.clone(),
            audit.clone(),
        ));
        let services = Arc::new(ServiceCatalog::new(stores.services.clone(), audit.clone()));
        let employees = Arc::new(EmployeeRegistry::new(
            stores.employees.clone(),
            audit.clone(),
        ));

        Self {
            config,
            stores,
            clock,
            audit,
            engine,
            ledger,
            rooms,
            clients,
            services,
            employees,
            shutdown: CancellationToken::new(),
        }
    }

    /// Initialize server state over the in-memory stores and the system
    /// clock, seeding demo data when configured.
    pub async fn initialize(config: &Config) -> Self {
        let state = Self::with_stores(config.clone(), Stores::in_memory(), Arc::new(SystemClock));
        if config.seed_demo_data {
            state.seed_demo_rooms().await;
        }
        state
    }

    /// Start the background reconciliation sweeper.
    ///
    /// Must be called before `Server::run()`.
    pub fn start_background_tasks(&self) {
        let sweeper = Sweeper::new(
            self.stores.reservations.clone(),
            self.stores.rooms.clone(),
            self.audit.clone(),
            self.clock.clone(),
        );
        let scheduler = SweepScheduler::new(
            sweeper,
            Duration::from_secs(self.config.sweep_interval_secs),
            self.config.deep_sweep_hour,
            self.shutdown.clone(),
        );
        tokio::spawn(scheduler.run());
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Seed the demo room inventory if the store is empty.
    async fn seed_demo_rooms(&self) {
        let existing = match self.stores.rooms.find_all().await {
            Ok(rooms) => rooms,
            Err(e) => {
                tracing::error!(error = %e, "Could not inspect room inventory for seeding");
                return;
            }
        };
        if !existing.is_empty() {
            return;
        }

        let actor = Actor::system();
        let seed = [
            ("101", "Single", 50, RoomStatus::Available),
            ("102", "Double", 80, RoomStatus::Available),
            ("103", "Suite", 150, RoomStatus::Available),
            ("201", "Single", 55, RoomStatus::Available),
            ("202", "Double", 85, RoomStatus::Occupied),
            ("203", "Suite", 160, RoomStatus::Maintenance),
        ];
        for (number, room_type, rate, status) in seed {
            let draft = RoomDraft {
                number: number.to_string(),
                room_type: room_type.to_string(),
                nightly_rate: Decimal::from(rate),
                status: Some(status),
            };
            if let Err(e) = self.rooms.create(draft, &actor).await {
                tracing::error!(room = number, error = %e, "Failed to seed demo room");
            }
        }
        tracing::info!("Demo room inventory seeded");
    }
}

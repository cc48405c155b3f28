//! Store interfaces
//!
//! The back office is storage-agnostic: every component talks to these
//! traits. Entities live in per-type arenas keyed by id; relationships are
//! id references resolved through the owning store.

pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{
    AuditEntry, Client, Employee, Payment, Reservation, ReservationStatus, Room, RoomStatus,
    ServiceAddon,
};

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Room inventory store
///
/// `save` assigns an id when the entity carries id 0 and returns the stored
/// record; the same convention applies to every store below.
#[async_trait]
pub trait RoomStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Room>>;
    async fn find_by_number(&self, number: &str) -> StoreResult<Option<Room>>;
    async fn find_by_status(&self, status: RoomStatus) -> StoreResult<Vec<Room>>;
    async fn count_by_status(&self, status: RoomStatus) -> StoreResult<u64>;
    async fn find_all(&self) -> StoreResult<Vec<Room>>;
    async fn save(&self, room: Room) -> StoreResult<Room>;
    async fn delete(&self, id: i64) -> StoreResult<bool>;
}

/// Client registry store
#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Client>>;
    async fn find_by_national_id(&self, national_id: &str) -> StoreResult<Option<Client>>;
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Client>>;
    async fn find_all(&self) -> StoreResult<Vec<Client>>;
    /// Paginated substring search over national id and names.
    async fn search(&self, query: &str, offset: usize, limit: usize)
    -> StoreResult<(Vec<Client>, u64)>;
    async fn save(&self, client: Client) -> StoreResult<Client>;
    async fn delete(&self, id: i64) -> StoreResult<bool>;
}

/// Reservation store, including the conflict queries used by the
/// availability checker.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Reservation>>;
    async fn find_by_client(&self, client_id: i64) -> StoreResult<Vec<Reservation>>;
    async fn find_by_room(&self, room_id: i64) -> StoreResult<Vec<Reservation>>;
    async fn find_by_status(&self, status: ReservationStatus) -> StoreResult<Vec<Reservation>>;
    async fn count_by_status(&self, status: ReservationStatus) -> StoreResult<u64>;
    async fn count_by_start_date(&self, date: NaiveDate) -> StoreResult<u64>;
    async fn count_by_end_date(&self, date: NaiveDate) -> StoreResult<u64>;
    async fn find_all(&self) -> StoreResult<Vec<Reservation>>;

    /// True when another PENDING/ACTIVE reservation on the room overlaps
    /// `[start, end)` under the half-open rule. `exclude` skips the
    /// reservation's own id during updates.
    async fn has_conflict(
        &self,
        room_id: i64,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<i64>,
    ) -> StoreResult<bool>;

    /// The overlapping PENDING/ACTIVE reservations themselves.
    async fn find_conflicts(
        &self,
        room_id: i64,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<i64>,
    ) -> StoreResult<Vec<Reservation>>;

    async fn save(&self, reservation: Reservation) -> StoreResult<Reservation>;
    async fn delete(&self, id: i64) -> StoreResult<bool>;
}

/// Optional-service catalog store
#[async_trait]
pub trait ServiceStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<ServiceAddon>>;
    /// Resolves ids to services in ascending id order; unknown ids are
    /// silently skipped.
    async fn find_by_ids(&self, ids: &[i64]) -> StoreResult<Vec<ServiceAddon>>;
    async fn find_active(&self) -> StoreResult<Vec<ServiceAddon>>;
    async fn find_all(&self) -> StoreResult<Vec<ServiceAddon>>;
    async fn save(&self, service: ServiceAddon) -> StoreResult<ServiceAddon>;
    async fn delete(&self, id: i64) -> StoreResult<bool>;
}

/// Payment store (one payment per reservation)
#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Payment>>;
    async fn find_by_reservation(&self, reservation_id: i64) -> StoreResult<Option<Payment>>;
    async fn save(&self, payment: Payment) -> StoreResult<Payment>;
    async fn delete(&self, id: i64) -> StoreResult<bool>;
}

/// Staff registry store
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Employee>>;
    async fn find_by_national_id(&self, national_id: &str) -> StoreResult<Option<Employee>>;
    async fn find_all(&self) -> StoreResult<Vec<Employee>>;
    async fn save(&self, employee: Employee) -> StoreResult<Employee>;
    async fn delete(&self, id: i64) -> StoreResult<bool>;
}

/// Append-only audit log store
#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn append(&self, entry: AuditEntry) -> StoreResult<AuditEntry>;
    /// Newest-first page of the log.
    async fn find_page(&self, offset: usize, limit: usize)
    -> StoreResult<(Vec<AuditEntry>, u64)>;
    /// Newest-first page filtered by keyword over action and detail.
    async fn search(
        &self,
        keyword: &str,
        offset: usize,
        limit: usize,
    ) -> StoreResult<(Vec<AuditEntry>, u64)>;
}

/// Bundle of all store handles shared by request handlers and the sweeper.
#[derive(Clone)]
pub struct Stores {
    pub rooms: Arc<dyn RoomStore>,
    pub clients: Arc<dyn ClientStore>,
    pub reservations: Arc<dyn ReservationStore>,
    pub services: Arc<dyn ServiceStore>,
    pub payments: Arc<dyn PaymentStore>,
    pub employees: Arc<dyn EmployeeStore>,
    pub audit: Arc<dyn AuditStore>,
}

impl Stores {
    /// In-memory arena-backed store set.
    pub fn in_memory() -> Self {
        Self {
            rooms: Arc::new(memory::MemoryRoomStore::new()),
            clients: Arc::new(memory::MemoryClientStore::new()),
            reservations: Arc::new(memory::MemoryReservationStore::new()),
            services: Arc::new(memory::MemoryServiceStore::new()),
            payments: Arc::new(memory::MemoryPaymentStore::new()),
            employees: Arc::new(memory::MemoryEmployeeStore::new()),
            audit: Arc::new(memory::MemoryAuditStore::new()),
        }
    }
}

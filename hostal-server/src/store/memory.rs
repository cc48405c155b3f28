//! In-memory arena stores
//!
//! Each entity type lives in its own `DashMap` keyed by id, with an atomic
//! id counter. Snapshots are sorted by id so listings stay deterministic.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;

use super::{
    AuditStore, ClientStore, EmployeeStore, PaymentStore, ReservationStore, RoomStore,
    ServiceStore, StoreResult,
};
use crate::domain::{
    AuditEntry, Client, Employee, Payment, Reservation, ReservationStatus, Room, RoomStatus,
    ServiceAddon,
};

/// Generic id-keyed arena
struct Arena<T> {
    items: DashMap<i64, T>,
    next_id: AtomicI64,
}

impl<T: Clone> Arena<T> {
    fn new() -> Self {
        Self {
            items: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn get(&self, id: i64) -> Option<T> {
        self.items.get(&id).map(|e| e.value().clone())
    }

    fn put(&self, id: i64, item: T) {
        self.items.insert(id, item);
    }

    fn remove(&self, id: i64) -> bool {
        self.items.remove(&id).is_some()
    }

    /// Snapshot of all items, sorted by id.
    fn snapshot(&self) -> Vec<(i64, T)> {
        let mut all: Vec<(i64, T)> = self
            .items
            .iter()
            .map(|e| (*e.key(), e.value().clone()))
            .collect();
        all.sort_by_key(|(id, _)| *id);
        all
    }
}

// =============================================================================
// Rooms
// =============================================================================

pub struct MemoryRoomStore {
    arena: Arena<Room>,
}

impl MemoryRoomStore {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }
}

impl Default for MemoryRoomStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomStore for MemoryRoomStore {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Room>> {
        Ok(self.arena.get(id))
    }

    async fn find_by_number(&self, number: &str) -> StoreResult<Option<Room>> {
        Ok(self
            .arena
            .snapshot()
            .into_iter()
            .map(|(_, r)| r)
            .find(|r| r.number == number))
    }

    async fn find_by_status(&self, status: RoomStatus) -> StoreResult<Vec<Room>> {
        Ok(self
            .arena
            .snapshot()
            .into_iter()
            .map(|(_, r)| r)
            .filter(|r| r.status == status)
            .collect())
    }

    async fn count_by_status(&self, status: RoomStatus) -> StoreResult<u64> {
        Ok(self.find_by_status(status).await?.len() as u64)
    }

    async fn find_all(&self) -> StoreResult<Vec<Room>> {
        Ok(self.arena.snapshot().into_iter().map(|(_, r)| r).collect())
    }

    async fn save(&self, mut room: Room) -> StoreResult<Room> {
        if room.id == 0 {
            room.id = self.arena.allocate_id();
        }
        self.arena.put(room.id, room.clone());
        Ok(room)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.arena.remove(id))
    }
}

// =============================================================================
// Clients
// =============================================================================

pub struct MemoryClientStore {
    arena: Arena<Client>,
}

impl MemoryClientStore {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }
}

impl Default for MemoryClientStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClientStore for MemoryClientStore {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Client>> {
        Ok(self.arena.get(id))
    }

    async fn find_by_national_id(&self, national_id: &str) -> StoreResult<Option<Client>> {
        Ok(self
            .arena
            .snapshot()
            .into_iter()
            .map(|(_, c)| c)
            .find(|c| c.national_id == national_id))
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Client>> {
        Ok(self
            .arena
            .snapshot()
            .into_iter()
            .map(|(_, c)| c)
            .find(|c| c.email.as_deref() == Some(email)))
    }

    async fn find_all(&self) -> StoreResult<Vec<Client>> {
        Ok(self.arena.snapshot().into_iter().map(|(_, c)| c).collect())
    }

    async fn search(
        &self,
        query: &str,
        offset: usize,
        limit: usize,
    ) -> StoreResult<(Vec<Client>, u64)> {
        let needle = query.trim().to_lowercase();
        let matches: Vec<Client> = self
            .arena
            .snapshot()
            .into_iter()
            .map(|(_, c)| c)
            .filter(|c| {
                needle.is_empty()
                    || c.national_id.to_lowercase().contains(&needle)
                    || c.first_names.to_lowercase().contains(&needle)
                    || c.last_names.to_lowercase().contains(&needle)
            })
            .collect();
        let total = matches.len() as u64;
        let page = matches.into_iter().skip(offset).take(limit).collect();
        Ok((page, total))
    }

    async fn save(&self, mut client: Client) -> StoreResult<Client> {
        if client.id == 0 {
            client.id = self.arena.allocate_id();
        }
        self.arena.put(client.id, client.clone());
        Ok(client)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.arena.remove(id))
    }
}

// =============================================================================
// Reservations
// =============================================================================

pub struct MemoryReservationStore {
    arena: Arena<Reservation>,
}

impl MemoryReservationStore {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    fn all(&self) -> Vec<Reservation> {
        self.arena.snapshot().into_iter().map(|(_, r)| r).collect()
    }

    fn conflicts(
        &self,
        room_id: i64,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<i64>,
    ) -> Vec<Reservation> {
        self.all()
            .into_iter()
            .filter(|r| {
                r.room_id == room_id
                    && r.status.blocks_availability()
                    && r.start_date < end
                    && start < r.end_date
                    && Some(r.id) != exclude
            })
            .collect()
    }
}

impl Default for MemoryReservationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReservationStore for MemoryReservationStore {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Reservation>> {
        Ok(self.arena.get(id))
    }

    async fn find_by_client(&self, client_id: i64) -> StoreResult<Vec<Reservation>> {
        Ok(self
            .all()
            .into_iter()
            .filter(|r| r.client_id == client_id)
            .collect())
    }

    async fn find_by_room(&self, room_id: i64) -> StoreResult<Vec<Reservation>> {
        Ok(self
            .all()
            .into_iter()
            .filter(|r| r.room_id == room_id)
            .collect())
    }

    async fn find_by_status(&self, status: ReservationStatus) -> StoreResult<Vec<Reservation>> {
        Ok(self
            .all()
            .into_iter()
            .filter(|r| r.status == status)
            .collect())
    }

    async fn count_by_status(&self, status: ReservationStatus) -> StoreResult<u64> {
        Ok(self.find_by_status(status).await?.len() as u64)
    }

    async fn count_by_start_date(&self, date: NaiveDate) -> StoreResult<u64> {
        Ok(self.all().iter().filter(|r| r.start_date == date).count() as u64)
    }

    async fn count_by_end_date(&self, date: NaiveDate) -> StoreResult<u64> {
        Ok(self.all().iter().filter(|r| r.end_date == date).count() as u64)
    }

    async fn find_all(&self) -> StoreResult<Vec<Reservation>> {
        Ok(self.all())
    }

    async fn has_conflict(
        &self,
        room_id: i64,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<i64>,
    ) -> StoreResult<bool> {
        Ok(!self.conflicts(room_id, start, end, exclude).is_empty())
    }

    async fn find_conflicts(
        &self,
        room_id: i64,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<i64>,
    ) -> StoreResult<Vec<Reservation>> {
        Ok(self.conflicts(room_id, start, end, exclude))
    }

    async fn save(&self, mut reservation: Reservation) -> StoreResult<Reservation> {
        if reservation.id == 0 {
            reservation.id = self.arena.allocate_id();
        }
        self.arena.put(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.arena.remove(id))
    }
}

// =============================================================================
// Service catalog
// =============================================================================

pub struct MemoryServiceStore {
    arena: Arena<ServiceAddon>,
}

impl MemoryServiceStore {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }
}

impl Default for MemoryServiceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServiceStore for MemoryServiceStore {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<ServiceAddon>> {
        Ok(self.arena.get(id))
    }

    async fn find_by_ids(&self, ids: &[i64]) -> StoreResult<Vec<ServiceAddon>> {
        let mut wanted: Vec<i64> = ids.to_vec();
        wanted.sort_unstable();
        wanted.dedup();
        Ok(wanted.into_iter().filter_map(|id| self.arena.get(id)).collect())
    }

    async fn find_active(&self) -> StoreResult<Vec<ServiceAddon>> {
        Ok(self
            .arena
            .snapshot()
            .into_iter()
            .map(|(_, s)| s)
            .filter(|s| s.active)
            .collect())
    }

    async fn find_all(&self) -> StoreResult<Vec<ServiceAddon>> {
        Ok(self.arena.snapshot().into_iter().map(|(_, s)| s).collect())
    }

    async fn save(&self, mut service: ServiceAddon) -> StoreResult<ServiceAddon> {
        if service.id == 0 {
            service.id = self.arena.allocate_id();
        }
        self.arena.put(service.id, service.clone());
        Ok(service)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.arena.remove(id))
    }
}

// =============================================================================
// Payments
// =============================================================================

pub struct MemoryPaymentStore {
    arena: Arena<Payment>,
}

impl MemoryPaymentStore {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }
}

impl Default for MemoryPaymentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentStore for MemoryPaymentStore {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Payment>> {
        Ok(self.arena.get(id))
    }

    async fn find_by_reservation(&self, reservation_id: i64) -> StoreResult<Option<Payment>> {
        Ok(self
            .arena
            .snapshot()
            .into_iter()
            .map(|(_, p)| p)
            .find(|p| p.reservation_id == reservation_id))
    }

    async fn save(&self, mut payment: Payment) -> StoreResult<Payment> {
        if payment.id == 0 {
            payment.id = self.arena.allocate_id();
        }
        self.arena.put(payment.id, payment.clone());
        Ok(payment)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.arena.remove(id))
    }
}

// =============================================================================
// Employees
// =============================================================================

pub struct MemoryEmployeeStore {
    arena: Arena<Employee>,
}

impl MemoryEmployeeStore {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }
}

impl Default for MemoryEmployeeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Employee>> {
        Ok(self.arena.get(id))
    }

    async fn find_by_national_id(&self, national_id: &str) -> StoreResult<Option<Employee>> {
        Ok(self
            .arena
            .snapshot()
            .into_iter()
            .map(|(_, e)| e)
            .find(|e| e.national_id == national_id))
    }

    async fn find_all(&self) -> StoreResult<Vec<Employee>> {
        Ok(self.arena.snapshot().into_iter().map(|(_, e)| e).collect())
    }

    async fn save(&self, mut employee: Employee) -> StoreResult<Employee> {
        if employee.id == 0 {
            employee.id = self.arena.allocate_id();
        }
        self.arena.put(employee.id, employee.clone());
        Ok(employee)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.arena.remove(id))
    }
}

// =============================================================================
// Audit log
// =============================================================================

pub struct MemoryAuditStore {
    arena: Arena<AuditEntry>,
}

impl MemoryAuditStore {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    /// Newest first: entries are appended with ascending ids.
    fn newest_first(&self) -> Vec<AuditEntry> {
        let mut all: Vec<AuditEntry> =
            self.arena.snapshot().into_iter().map(|(_, e)| e).collect();
        all.reverse();
        all
    }
}

impl Default for MemoryAuditStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditStore for MemoryAuditStore {
    async fn append(&self, mut entry: AuditEntry) -> StoreResult<AuditEntry> {
        entry.id = self.arena.allocate_id();
        self.arena.put(entry.id, entry.clone());
        Ok(entry)
    }

    async fn find_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> StoreResult<(Vec<AuditEntry>, u64)> {
        let all = self.newest_first();
        let total = all.len() as u64;
        let page = all.into_iter().skip(offset).take(limit).collect();
        Ok((page, total))
    }

    async fn search(
        &self,
        keyword: &str,
        offset: usize,
        limit: usize,
    ) -> StoreResult<(Vec<AuditEntry>, u64)> {
        let needle = keyword.trim().to_lowercase();
        let matches: Vec<AuditEntry> = self
            .newest_first()
            .into_iter()
            .filter(|e| {
                e.action.to_string().to_lowercase().contains(&needle)
                    || e.detail.to_lowercase().contains(&needle)
            })
            .collect();
        let total = matches.len() as u64;
        let page = matches.into_iter().skip(offset).take(limit).collect();
        Ok((page, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReservationStatus;
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, d).unwrap()
    }

    fn reservation(room_id: i64, start: u32, end: u32, status: ReservationStatus) -> Reservation {
        Reservation {
            id: 0,
            client_id: 1,
            room_id,
            start_date: date(start),
            end_date: date(end),
            check_in_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            check_out_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            stay_days: (end - start) as i64,
            total_price: Decimal::from(100),
            status,
            actual_departure: None,
            service_ids: Vec::new(),
            service_options: BTreeMap::new(),
            payment_id: None,
        }
    }

    #[tokio::test]
    async fn conflict_uses_half_open_ranges() {
        let store = MemoryReservationStore::new();
        store
            .save(reservation(1, 10, 13, ReservationStatus::Pending))
            .await
            .unwrap();

        // Overlap in the middle.
        assert!(store.has_conflict(1, date(12), date(14), None).await.unwrap());
        // Touching at the checkout day is not a conflict.
        assert!(!store.has_conflict(1, date(13), date(15), None).await.unwrap());
        assert!(!store.has_conflict(1, date(8), date(10), None).await.unwrap());
        // Different room never conflicts.
        assert!(!store.has_conflict(2, date(10), date(13), None).await.unwrap());
    }

    #[tokio::test]
    async fn terminal_states_do_not_block_availability() {
        let store = MemoryReservationStore::new();
        let saved = store
            .save(reservation(1, 10, 13, ReservationStatus::Cancelled))
            .await
            .unwrap();
        store
            .save(reservation(1, 10, 13, ReservationStatus::Finalized))
            .await
            .unwrap();

        assert!(!store.has_conflict(1, date(10), date(13), None).await.unwrap());
        assert!(saved.id > 0);
    }

    #[tokio::test]
    async fn exclude_skips_the_reservations_own_id() {
        let store = MemoryReservationStore::new();
        let saved = store
            .save(reservation(1, 10, 13, ReservationStatus::Active))
            .await
            .unwrap();

        assert!(store.has_conflict(1, date(10), date(13), None).await.unwrap());
        assert!(
            !store
                .has_conflict(1, date(10), date(13), Some(saved.id))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn find_by_ids_resolves_in_ascending_id_order() {
        let store = MemoryServiceStore::new();
        let a = store
            .save(crate::domain::ServiceAddon {
                id: 0,
                name: "Breakfast".into(),
                description: String::new(),
                price: Decimal::from(10),
                active: true,
                options: Vec::new(),
            })
            .await
            .unwrap();
        let b = store
            .save(crate::domain::ServiceAddon {
                id: 0,
                name: "Spa".into(),
                description: String::new(),
                price: Decimal::from(25),
                active: true,
                options: Vec::new(),
            })
            .await
            .unwrap();

        // Caller order and duplicates do not matter; unknown ids are skipped.
        let resolved = store.find_by_ids(&[b.id, a.id, a.id, 999]).await.unwrap();
        let ids: Vec<i64> = resolved.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }
}

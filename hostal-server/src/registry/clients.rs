//! Client registry
//!
//! CRUD over the client base, including the deletion guard: a client with
//! any PENDING/ACTIVE reservation cannot be deleted, and the conflict
//! carries summaries of exactly the blocking reservations.

use std::sync::Arc;

use serde::Deserialize;
use validator::Validate;

use crate::audit::AuditTrail;
use crate::booking::error::{BlockingReservation, EngineError, EngineResult};
use crate::domain::{Actor, AuditAction, Client};
use crate::store::{ClientStore, ReservationStore, RoomStore};

/// Input for creating or updating a client
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClientDraft {
    #[validate(length(min = 1, max = 100))]
    pub first_names: String,
    #[validate(length(min = 1, max = 100))]
    pub last_names: String,
    #[validate(length(equal = 8))]
    pub national_id: String,
    pub nationality: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Paginated search result
#[derive(Debug, Clone, serde::Serialize)]
pub struct ClientPage {
    pub items: Vec<Client>,
    pub total: u64,
}

#[derive(Clone)]
pub struct ClientRegistry {
    clients: Arc<dyn ClientStore>,
    reservations: Arc<dyn ReservationStore>,
    rooms: Arc<dyn RoomStore>,
    audit: AuditTrail,
}

impl ClientRegistry {
    pub fn new(
        clients: Arc<dyn ClientStore>,
        reservations: Arc<dyn ReservationStore>,
        rooms: Arc<dyn RoomStore>,
        audit: AuditTrail,
    ) -> Self {
        Self {
            clients,
            reservations,
            rooms,
            audit,
        }
    }

    pub async fn create(&self, draft: ClientDraft, actor: &Actor) -> EngineResult<Client> {
        self.validate(&draft)?;
        if self
            .clients
            .find_by_national_id(&draft.national_id)
            .await?
            .is_some()
        {
            return Err(EngineError::Validation(format!(
                "A client with national id '{}' already exists",
                draft.national_id
            )));
        }
        if let Some(email) = draft.email.as_deref()
            && self.clients.find_by_email(email).await?.is_some()
        {
            return Err(EngineError::Validation(format!(
                "A client with email '{}' already exists",
                email
            )));
        }

        let client = self
            .clients
            .save(Client {
                id: 0,
                first_names: draft.first_names,
                last_names: draft.last_names,
                national_id: draft.national_id,
                nationality: draft.nationality,
                email: draft.email,
                phone: draft.phone,
            })
            .await?;

        self.audit
            .record(
                actor,
                AuditAction::ClientCreated,
                format!(
                    "New client registered: {} (national id: {})",
                    client.full_name(),
                    client.national_id
                ),
                "client",
                client.id,
            )
            .await;

        Ok(client)
    }

    pub async fn update(&self, id: i64, draft: ClientDraft, actor: &Actor) -> EngineResult<Client> {
        self.validate(&draft)?;
        let mut client = self
            .clients
            .find_by_id(id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("Client {} not found", id)))?;

        if client.national_id != draft.national_id
            && self
                .clients
                .find_by_national_id(&draft.national_id)
                .await?
                .is_some()
        {
            return Err(EngineError::Validation(format!(
                "National id '{}' is already in use by another client",
                draft.national_id
            )));
        }
        if let Some(email) = draft.email.as_deref()
            && client.email.as_deref() != Some(email)
            && self.clients.find_by_email(email).await?.is_some()
        {
            return Err(EngineError::Validation(format!(
                "Email '{}' is already in use by another client",
                email
            )));
        }

        client.first_names = draft.first_names;
        client.last_names = draft.last_names;
        client.national_id = draft.national_id;
        client.nationality = draft.nationality;
        client.email = draft.email;
        client.phone = draft.phone;
        let client = self.clients.save(client).await?;

        self.audit
            .record(
                actor,
                AuditAction::ClientUpdated,
                format!(
                    "Client '{}' (ID: {}) updated.",
                    client.full_name(),
                    client.id
                ),
                "client",
                client.id,
            )
            .await;

        Ok(client)
    }

    /// Delete a client.
    ///
    /// Blocked while any of the client's reservations is PENDING or ACTIVE;
    /// the conflict lists those reservations. Otherwise the (terminal)
    /// reservations are deleted first, then the client.
    pub async fn delete(&self, id: i64, actor: &Actor) -> EngineResult<()> {
        let client = self
            .clients
            .find_by_id(id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("Client {} not found", id)))?;

        let reservations = self.reservations.find_by_client(id).await?;
        let mut blocking = Vec::new();
        for r in reservations
            .iter()
            .filter(|r| r.status.blocks_availability())
        {
            let room_number = match self.rooms.find_by_id(r.room_id).await? {
                Some(room) => room.number,
                None => r.room_id.to_string(),
            };
            blocking.push(BlockingReservation {
                id: r.id,
                room_number,
                status: r.status.to_string(),
                start_date: r.start_date,
                end_date: r.end_date,
            });
        }
        if !blocking.is_empty() {
            return Err(EngineError::ClientHasActiveReservations {
                client_id: client.id,
                blocking,
            });
        }

        for r in &reservations {
            self.reservations.delete(r.id).await?;
        }
        self.clients.delete(id).await?;

        self.audit
            .record(
                actor,
                AuditAction::ClientDeleted,
                format!(
                    "Client '{}' (ID: {}) deleted.",
                    client.full_name(),
                    client.id
                ),
                "client",
                client.id,
            )
            .await;

        Ok(())
    }

    pub async fn find_by_id(&self, id: i64) -> EngineResult<Option<Client>> {
        Ok(self.clients.find_by_id(id).await?)
    }

    pub async fn find_by_national_id(&self, national_id: &str) -> EngineResult<Option<Client>> {
        Ok(self.clients.find_by_national_id(national_id).await?)
    }

    pub async fn find_all(&self) -> EngineResult<Vec<Client>> {
        Ok(self.clients.find_all().await?)
    }

    pub async fn search(
        &self,
        query: &str,
        offset: usize,
        limit: usize,
    ) -> EngineResult<ClientPage> {
        let (items, total) = self
            .clients
            .search(query, offset, limit.clamp(1, 200))
            .await?;
        Ok(ClientPage { items, total })
    }

    fn validate(&self, draft: &ClientDraft) -> EngineResult<()> {
        draft
            .validate()
            .map_err(|e| EngineError::Validation(e.to_string()))?;
        if !draft.national_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(EngineError::Validation(
                "The national id must be an 8-digit number".into(),
            ));
        }
        Ok(())
    }
}

//! Optional-service catalog

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::audit::AuditTrail;
use crate::booking::error::{EngineError, EngineResult};
use crate::domain::{Actor, AuditAction, ServiceAddon};
use crate::store::ServiceStore;

/// Input for creating or updating a catalog service
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ServiceDraft {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub options: Vec<String>,
}

fn default_active() -> bool {
    true
}

#[derive(Clone)]
pub struct ServiceCatalog {
    services: Arc<dyn ServiceStore>,
    audit: AuditTrail,
}

impl ServiceCatalog {
    pub fn new(services: Arc<dyn ServiceStore>, audit: AuditTrail) -> Self {
        Self { services, audit }
    }

    pub async fn create(&self, draft: ServiceDraft, actor: &Actor) -> EngineResult<ServiceAddon> {
        self.validate(&draft)?;
        let service = self
            .services
            .save(ServiceAddon {
                id: 0,
                name: draft.name,
                description: draft.description,
                price: draft.price,
                active: draft.active,
                options: draft.options,
            })
            .await?;

        self.audit
            .record(
                actor,
                AuditAction::ServiceCreated,
                format!("Service '{}' created (${})", service.name, service.price),
                "service",
                service.id,
            )
            .await;

        Ok(service)
    }

    pub async fn update(
        &self,
        id: i64,
        draft: ServiceDraft,
        actor: &Actor,
    ) -> EngineResult<ServiceAddon> {
        self.validate(&draft)?;
        let mut service = self
            .services
            .find_by_id(id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("Service {} not found", id)))?;

        service.name = draft.name;
        service.description = draft.description;
        service.price = draft.price;
        service.active = draft.active;
        service.options = draft.options;
        let service = self.services.save(service).await?;

        self.audit
            .record(
                actor,
                AuditAction::ServiceUpdated,
                format!("Service '{}' (ID: {}) updated.", service.name, service.id),
                "service",
                service.id,
            )
            .await;

        Ok(service)
    }

    pub async fn delete(&self, id: i64, actor: &Actor) -> EngineResult<()> {
        let service = self
            .services
            .find_by_id(id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("Service {} not found", id)))?;
        self.services.delete(id).await?;

        self.audit
            .record(
                actor,
                AuditAction::ServiceDeleted,
                format!("Service '{}' (ID: {}) deleted.", service.name, service.id),
                "service",
                service.id,
            )
            .await;

        Ok(())
    }

    pub async fn find_by_id(&self, id: i64) -> EngineResult<Option<ServiceAddon>> {
        Ok(self.services.find_by_id(id).await?)
    }

    pub async fn find_active(&self) -> EngineResult<Vec<ServiceAddon>> {
        Ok(self.services.find_active().await?)
    }

    pub async fn find_all(&self) -> EngineResult<Vec<ServiceAddon>> {
        Ok(self.services.find_all().await?)
    }

    fn validate(&self, draft: &ServiceDraft) -> EngineResult<()> {
        draft
            .validate()
            .map_err(|e| EngineError::Validation(e.to_string()))?;
        if draft.price <= Decimal::ZERO {
            return Err(EngineError::Validation(
                "The service price must be positive".into(),
            ));
        }
        Ok(())
    }
}

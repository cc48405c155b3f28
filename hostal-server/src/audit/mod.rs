//! Audit trail
//!
//! Append-only record of administrative actions. Recording is best-effort:
//! a failed audit write is logged and swallowed so it never blocks or fails
//! the triggering business operation.

use std::sync::Arc;

use crate::domain::{Actor, AuditAction, AuditEntry, AuditPage, AuditQuery};
use crate::store::{AuditStore, EmployeeStore, StoreResult};
use crate::utils::Clock;

#[derive(Clone)]
pub struct AuditTrail {
    store: Arc<dyn AuditStore>,
    employees: Arc<dyn EmployeeStore>,
    clock: Arc<dyn Clock>,
}

impl AuditTrail {
    pub fn new(
        store: Arc<dyn AuditStore>,
        employees: Arc<dyn EmployeeStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            employees,
            clock,
        }
    }

    /// Record an administrative action.
    ///
    /// The acting employee is resolved from the actor when it carries a staff
    /// id; system and client actors are recorded without an employee link.
    pub async fn record(
        &self,
        actor: &Actor,
        action: AuditAction,
        detail: impl Into<String>,
        entity_type: &str,
        entity_id: i64,
    ) {
        let (employee_id, employee_name) = self.resolve_operator(actor).await;

        let entry = AuditEntry {
            id: 0,
            timestamp: self.clock.now(),
            employee_id,
            employee_name,
            action,
            detail: detail.into(),
            entity_type: entity_type.to_string(),
            entity_id,
        };

        if let Err(e) = self.store.append(entry).await {
            tracing::warn!(target: "audit", error = %e, action = %action, "Failed to append audit entry");
        }
    }

    async fn resolve_operator(&self, actor: &Actor) -> (Option<i64>, Option<String>) {
        if !actor.is_staff() {
            return (None, actor.username.clone());
        }
        if let Some(id) = actor.id
            && let Ok(Some(employee)) = self.employees.find_by_id(id).await
        {
            return (Some(id), Some(employee.full_name()));
        }
        (actor.id, actor.username.clone())
    }

    /// Newest-first page of the log, optionally filtered by keyword.
    pub async fn page(&self, query: &AuditQuery) -> StoreResult<AuditPage> {
        let limit = query.limit.clamp(1, 200);
        let (items, total) = match query.q.as_deref().map(str::trim) {
            Some(keyword) if !keyword.is_empty() => {
                // Cap keyword length the same way the log viewer does.
                let keyword: String = keyword.chars().take(100).collect();
                self.store.search(&keyword, query.offset, limit).await?
            }
            _ => self.store.find_page(query.offset, limit).await?,
        };
        Ok(AuditPage { items, total })
    }
}

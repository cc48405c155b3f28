//! Staff registry
//!
//! Employee records feed the audit trail's operator attribution. Login
//! accounts themselves are owned by the upstream identity service.

use std::sync::Arc;

use serde::Deserialize;
use validator::Validate;

use crate::audit::AuditTrail;
use crate::booking::error::{EngineError, EngineResult};
use crate::domain::{Actor, AuditAction, Employee};
use crate::store::EmployeeStore;

/// Input for creating or updating an employee
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EmployeeDraft {
    #[validate(length(min = 1, max = 100))]
    pub first_names: String,
    #[validate(length(min = 1, max = 100))]
    pub last_names: String,
    #[validate(length(equal = 8))]
    pub national_id: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Clone)]
pub struct EmployeeRegistry {
    employees: Arc<dyn EmployeeStore>,
    audit: AuditTrail,
}

impl EmployeeRegistry {
    pub fn new(employees: Arc<dyn EmployeeStore>, audit: AuditTrail) -> Self {
        Self { employees, audit }
    }

    pub async fn create(&self, draft: EmployeeDraft, actor: &Actor) -> EngineResult<Employee> {
        draft
            .validate()
            .map_err(|e| EngineError::Validation(e.to_string()))?;
        if self
            .employees
            .find_by_national_id(&draft.national_id)
            .await?
            .is_some()
        {
            return Err(EngineError::Validation(format!(
                "An employee with national id '{}' already exists",
                draft.national_id
            )));
        }

        let employee = self
            .employees
            .save(Employee {
                id: 0,
                first_names: draft.first_names,
                last_names: draft.last_names,
                national_id: draft.national_id,
                email: draft.email,
                phone: draft.phone,
            })
            .await?;

        self.audit
            .record(
                actor,
                AuditAction::EmployeeCreated,
                format!(
                    "New employee registered: {} (national id: {})",
                    employee.full_name(),
                    employee.national_id
                ),
                "employee",
                employee.id,
            )
            .await;

        Ok(employee)
    }

    pub async fn update(
        &self,
        id: i64,
        draft: EmployeeDraft,
        actor: &Actor,
    ) -> EngineResult<Employee> {
        draft
            .validate()
            .map_err(|e| EngineError::Validation(e.to_string()))?;
        let mut employee = self
            .employees
            .find_by_id(id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("Employee {} not found", id)))?;

        if employee.national_id != draft.national_id
            && self
                .employees
                .find_by_national_id(&draft.national_id)
                .await?
                .is_some()
        {
            return Err(EngineError::Validation(format!(
                "National id '{}' is already in use by another employee",
                draft.national_id
            )));
        }

        employee.first_names = draft.first_names;
        employee.last_names = draft.last_names;
        employee.national_id = draft.national_id;
        employee.email = draft.email;
        employee.phone = draft.phone;
        let employee = self.employees.save(employee).await?;

        self.audit
            .record(
                actor,
                AuditAction::EmployeeUpdated,
                format!(
                    "Employee '{}' (ID: {}) updated.",
                    employee.full_name(),
                    employee.id
                ),
                "employee",
                employee.id,
            )
            .await;

        Ok(employee)
    }

    pub async fn delete(&self, id: i64, actor: &Actor) -> EngineResult<()> {
        let employee = self
            .employees
            .find_by_id(id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("Employee {} not found", id)))?;
        self.employees.delete(id).await?;

        self.audit
            .record(
                actor,
                AuditAction::EmployeeDeleted,
                format!(
                    "Employee '{}' (ID: {}) deleted.",
                    employee.full_name(),
                    employee.id
                ),
                "employee",
                employee.id,
            )
            .await;

        Ok(())
    }

    pub async fn find_by_id(&self, id: i64) -> EngineResult<Option<Employee>> {
        Ok(self.employees.find_by_id(id).await?)
    }

    pub async fn find_all(&self) -> EngineResult<Vec<Employee>> {
        Ok(self.employees.find_all().await?)
    }
}

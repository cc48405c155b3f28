//! Employee API handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::domain::{Actor, Employee};
use crate::registry::EmployeeDraft;
use crate::utils::{AppError, AppResult};

/// List all employees
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Employee>>> {
    let employees = state.employees.find_all().await?;
    Ok(Json(employees))
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Employee>> {
    let employee = state
        .employees
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))?;
    Ok(Json(employee))
}

/// Create an employee
pub async fn create(
    State(state): State<ServerState>,
    actor: Actor,
    Json(draft): Json<EmployeeDraft>,
) -> AppResult<Json<Employee>> {
    let employee = state.employees.create(draft, &actor).await?;
    Ok(Json(employee))
}

/// Update an employee
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    actor: Actor,
    Json(draft): Json<EmployeeDraft>,
) -> AppResult<Json<Employee>> {
    let employee = state.employees.update(id, draft, &actor).await?;
    Ok(Json(employee))
}

/// Delete an employee
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    actor: Actor,
) -> AppResult<Json<serde_json::Value>> {
    state.employees.delete(id, &actor).await?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}

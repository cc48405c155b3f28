//! Audit log API handlers

use axum::{
    Json,
    extract::{Query, State},
};

use crate::core::ServerState;
use crate::domain::{AuditPage, AuditQuery};
use crate::utils::{AppError, AppResult};

/// Newest-first page of the audit log, optionally filtered by keyword
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<AuditQuery>,
) -> AppResult<Json<AuditPage>> {
    let page = state
        .audit
        .page(&query)
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;
    Ok(Json(page))
}

//! Actor identity: who is performing an operation
//!
//! Authentication itself is owned by the upstream gateway; the back office
//! only consumes the forwarded identity and passes it explicitly into every
//! operation that needs it.

use serde::{Deserialize, Serialize};

/// Role of the authenticated actor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Receptionist,
    Client,
}

impl Role {
    /// Staff roles may cancel reservations on a client's behalf; clients
    /// must go through the front desk.
    pub fn may_cancel_reservations(self) -> bool {
        matches!(self, Role::Admin | Role::Receptionist)
    }

    pub fn is_staff(self) -> bool {
        matches!(self, Role::Admin | Role::Receptionist)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Some(Role::Admin),
            "RECEPTIONIST" => Some(Role::Receptionist),
            "CLIENT" => Some(Role::Client),
            _ => None,
        }
    }
}

/// Current actor, as forwarded by the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Staff account id when the actor is an employee
    pub id: Option<i64>,
    pub username: Option<String>,
    pub role: Option<Role>,
}

impl Actor {
    /// Unauthenticated caller (system startup, background jobs).
    pub fn anonymous() -> Self {
        Self {
            id: None,
            username: None,
            role: None,
        }
    }

    /// Internal system actor for sweeper-driven transitions.
    pub fn system() -> Self {
        Self {
            id: None,
            username: Some("system".to_string()),
            role: None,
        }
    }

    pub fn staff(id: i64, username: impl Into<String>, role: Role) -> Self {
        Self {
            id: Some(id),
            username: Some(username.into()),
            role: Some(role),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.role.is_some()
    }

    pub fn is_staff(&self) -> bool {
        self.role.map(Role::is_staff).unwrap_or(false)
    }

    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("anonymous")
    }
}

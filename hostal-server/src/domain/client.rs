//! Client entity

use serde::{Deserialize, Serialize};

/// Registered hotel client
///
/// The national id is the natural key used by the front desk; it is unique
/// across the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub first_names: String,
    pub last_names: String,
    /// Unique 8-digit national id
    pub national_id: String,
    pub nationality: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Client {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_names, self.last_names)
    }
}

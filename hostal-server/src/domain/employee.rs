//! Employee entity

use serde::{Deserialize, Serialize};

/// Staff member; referenced by audit entries as the acting operator.
/// Login accounts and credentials live in the upstream identity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub first_names: String,
    pub last_names: String,
    pub national_id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_names, self.last_names)
    }
}

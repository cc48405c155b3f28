//! Optional-service add-on entity

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Optional add-on a reservation can attach (breakfast, spa, parking...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceAddon {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Positive price, charged once per reservation
    pub price: Decimal,
    pub active: bool,
    /// Selectable option labels ("Continental", "Buffet"...)
    pub options: Vec<String>,
}

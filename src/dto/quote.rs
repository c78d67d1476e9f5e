use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub address: String,
}

/// A tank configuration to be priced or submitted as a quote.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct QuoteRequest {
    pub tank_type: String,
    pub capacity: i64,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub accessories: Vec<String>,
    pub quantity: i64,
    #[serde(default)]
    pub delivery_province: String,
    #[serde(default)]
    pub customer: CustomerInfo,
    #[serde(default)]
    pub special_requirements: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteSubmitted {
    /// e.g. `ATL-345678`.
    pub quote_number: String,
    pub total: i64,
    pub total_display: String,
    pub valid_until: DateTime<Utc>,
}

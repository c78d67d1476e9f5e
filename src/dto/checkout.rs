use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutPreviewRequest {
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub installation_required: bool,
}

/// Order total composition: cart total, flat province shipping, optional
/// per-tank installation.
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutTotals {
    pub subtotal: i64,
    pub shipping: i64,
    pub installation: i64,
    pub total: i64,
    pub total_display: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub company: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub province: String,
    #[serde(default)]
    pub postal_code: String,
    pub payment_method: String,
    #[serde(default)]
    pub delivery_instructions: String,
    #[serde(default)]
    pub installation_required: bool,
}

pub const PAYMENT_METHODS: &[&str] = &["bank-transfer", "pay-on-delivery", "company-account"];

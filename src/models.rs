use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Catalog entity. Owned by the content store; read-only from the cart's
/// point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Slug identifier, e.g. `wt-5000`.
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub short_description: String,
    /// Unit price in whole kina.
    pub price: i64,
    pub original_price: Option<i64>,
    /// Capacity in liters.
    pub capacity: i64,
    pub dimensions: Dimensions,
    pub features: Vec<String>,
    pub specifications: BTreeMap<String, String>,
    pub images: Vec<String>,
    /// Available colors, in display order.
    pub colors: Vec<String>,
    pub in_stock: bool,
    pub lead_time: String,
    #[serde(default)]
    pub is_best_seller: bool,
    #[serde(default)]
    pub is_new: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Dimensions {
    /// Diameter in centimeters.
    pub diameter: i64,
    /// Height in centimeters.
    pub height: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// One configured purchase line in a shopping cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    /// Generated from product id, color and creation time.
    pub id: String,
    /// Snapshot of the product at the time the line was created.
    pub product: Product,
    pub quantity: i64,
    pub selected_color: String,
    pub customizations: Option<Customizations>,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Customizations {
    #[serde(default)]
    pub accessories: Vec<String>,
    pub special_instructions: Option<String>,
}

/// The cart aggregate. `total_items` and `total_price` are derived from
/// `items` and must never be mutated independently; every mutation goes
/// through the operations in [`crate::cart`], which recompute them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartState {
    pub items: Vec<CartItem>,
    /// Presentation flag for the cart drawer.
    pub is_open: bool,
    pub total_items: i64,
    pub total_price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    /// "admin" or "customer".
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// An order as captured at checkout. Ephemeral: kept in the in-process
/// order log for the admin dashboard, never written to durable storage.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderRecord {
    /// Timestamp-derived, e.g. `ATL-34567890`.
    pub number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub shipping_address: String,
    pub province: String,
    pub payment_method: String,
    pub installation_required: bool,
    pub items: Vec<OrderLine>,
    pub subtotal: i64,
    pub shipping: i64,
    pub installation: i64,
    pub total: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderLine {
    pub name: String,
    pub quantity: i64,
    pub color: String,
    pub price: i64,
}

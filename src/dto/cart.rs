use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::cart::{color_surcharge, line_total};
use crate::models::{CartItem, CartState};
use crate::money::{format_kina, group_digits};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddItemRequest {
    pub product_id: String,
    pub quantity: i64,
    pub color: String,
    #[serde(default)]
    pub accessories: Vec<String>,
    pub special_instructions: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct QuantityRequest {
    pub quantity: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ColorRequest {
    pub color: String,
}

/// Display projection of one cart line.
#[derive(Debug, Serialize, ToSchema)]
pub struct CartLineView {
    pub id: String,
    pub product_id: String,
    /// e.g. "5000L Water Storage Tank (beige)".
    pub display_name: String,
    /// e.g. "5,000L capacity".
    pub subtitle: String,
    pub selected_color: String,
    pub quantity: i64,
    pub unit_price: i64,
    pub color_surcharge: i64,
    pub line_total: i64,
    pub line_total_display: String,
}

impl From<&CartItem> for CartLineView {
    fn from(item: &CartItem) -> Self {
        let total = line_total(item);
        Self {
            id: item.id.clone(),
            product_id: item.product.id.clone(),
            display_name: format!("{} ({})", item.product.name, item.selected_color),
            subtitle: format!("{}L capacity", group_digits(item.product.capacity as u64)),
            selected_color: item.selected_color.clone(),
            quantity: item.quantity,
            unit_price: item.product.price,
            color_surcharge: color_surcharge(&item.selected_color),
            line_total: total,
            line_total_display: format_kina(total),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub is_open: bool,
    pub total_items: i64,
    pub total_price: i64,
    pub total_price_display: String,
}

impl From<&CartState> for CartView {
    fn from(cart: &CartState) -> Self {
        Self {
            items: cart.items.iter().map(CartLineView::from).collect(),
            is_open: cart.is_open,
            total_items: cart.total_items,
            total_price: cart.total_price,
            total_price_display: format_kina(cart.total_price),
        }
    }
}

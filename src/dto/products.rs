use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Dimensions, Product, ProductCategory};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    /// Slug identifier; must be unique in the catalog.
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub short_description: String,
    pub price: i64,
    pub original_price: Option<i64>,
    pub capacity: i64,
    pub dimensions: Dimensions,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub colors: Vec<String>,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    pub lead_time: String,
    #[serde(default)]
    pub is_best_seller: bool,
    #[serde(default)]
    pub is_new: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryList {
    pub items: Vec<ProductCategory>,
}

//! Catalog entities managed through the CRUD endpoints.
//!
//! Field names follow the backend's camelCase JSON.

use serde::{Deserialize, Serialize};

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Server-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
}

/// Body for creating or renaming a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryForm {
    /// Display name.
    pub name: String,
}

/// A sellable catalog item.
///
/// The order screen only needs `id`, `name` and `price`; the management
/// screen also reads `quantity` and `category_id`, which some listings omit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Server-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Quantity recorded on the item itself.
    #[serde(default)]
    pub quantity: i64,
    /// Owning category.
    #[serde(default)]
    pub category_id: Option<i64>,
}

/// Body for creating or updating an item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemForm {
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Initial or corrected quantity.
    pub quantity: i64,
    /// Owning category.
    pub category_id: i64,
}

/// A stock record for one item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    /// Server-assigned identifier.
    pub id: i64,
    /// Units on hand.
    pub quantity: i64,
    /// Item this stock belongs to.
    pub item_id: i64,
}

/// Body for creating or updating a stock record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StockForm {
    /// Units on hand.
    pub quantity: i64,
    /// Item this stock belongs to.
    pub item_id: i64,
}

//! Stores and their inventory

use chrono::{DateTime, Utc};
use kernel::id::{ProductId, StoreId};

use crate::domain::address::Address;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSummary {
    pub id: StoreId,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub addresses: Vec<Address>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub stock: i32,
}

/// A store with its addresses and inventory.
#[derive(Debug, Clone)]
pub struct StoreDetail {
    pub store: Store,
    pub inventory: Vec<InventoryItem>,
}

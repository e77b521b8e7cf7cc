//! Data Transfer Objects

use chrono::{DateTime, Utc};
use kernel::id::{AddressId, CategoryId, ProductId, StoreId, StoreProductId, UserAddressId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::address::{Address, UserAddress};
use crate::domain::product::{Category, Product, ProductDraft, StoreProduct, StoreStock};
use crate::domain::store::{InventoryItem, Store, StoreDetail, StoreSummary};

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

/// All fields optional so that absence is reported with the catalog's
/// own messages.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub weight: Option<i32>,
    pub stock: Option<i32>,
    pub category_ids: Option<Vec<String>>,
    pub store_id: Option<String>,
}

impl From<CreateProductRequest> for ProductDraft {
    fn from(req: CreateProductRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price: req.price,
            weight: req.weight,
            stock: req.stock,
            category_ids: req.category_ids,
            store_id: req.store_id,
        }
    }
}

// ============================================================================
// Products
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStockResponse {
    pub store_id: StoreId,
    pub store_name: String,
    pub stock: i32,
}

impl From<StoreStock> for StoreStockResponse {
    fn from(s: StoreStock) -> Self {
        Self {
            store_id: s.store_id,
            store_name: s.store_name,
            stock: s.stock,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: CategoryId,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
        }
    }
}

/// Listing entry; categories are flattened to their names.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListItem {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub weight: i32,
    pub category: Vec<String>,
    pub total_stock: i64,
    pub stock_per_store: Vec<StoreStockResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductListItem {
    fn from(p: Product) -> Self {
        let total_stock = p.total_stock();
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            weight: p.weight,
            category: p.categories.into_iter().map(|c| c.name).collect(),
            total_stock,
            stock_per_store: p.stock.into_iter().map(Into::into).collect(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailResponse {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub weight: i32,
    pub categories: Vec<CategoryResponse>,
    pub total_stock: i64,
    pub stock_per_store: Vec<StoreStockResponse>,
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductDetailResponse {
    fn from(p: Product) -> Self {
        let total_stock = p.total_stock();
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            weight: p.weight,
            categories: p.categories.into_iter().map(Into::into).collect(),
            total_stock,
            stock_per_store: p.stock.into_iter().map(Into::into).collect(),
            created_by: p.created_by,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreProductResponse {
    pub id: StoreProductId,
    pub product_id: ProductId,
    pub store_id: StoreId,
    pub stock: i32,
}

impl From<StoreProduct> for StoreProductResponse {
    fn from(sp: StoreProduct) -> Self {
        Self {
            id: sp.id,
            product_id: sp.product_id,
            store_id: sp.store_id,
            stock: sp.stock,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductResponse {
    pub product: ProductDetailResponse,
    pub store_product: StoreProductResponse,
}

// ============================================================================
// Stores & Addresses
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub id: AddressId,
    pub address_line: String,
    pub city: String,
    pub province: String,
    pub postal_code: Option<String>,
}

impl From<Address> for AddressResponse {
    fn from(a: Address) -> Self {
        Self {
            id: a.id,
            address_line: a.address_line,
            city: a.city,
            province: a.province,
            postal_code: a.postal_code,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreResponse {
    pub id: StoreId,
    pub name: String,
    pub addresses: Vec<AddressResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Store> for StoreResponse {
    fn from(s: Store) -> Self {
        Self {
            id: s.id,
            name: s.name,
            addresses: s.addresses.into_iter().map(Into::into).collect(),
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryResponse {
    pub product_id: ProductId,
    pub product_name: String,
    pub stock: i32,
}

impl From<InventoryItem> for InventoryResponse {
    fn from(i: InventoryItem) -> Self {
        Self {
            product_id: i.product_id,
            product_name: i.product_name,
            stock: i.stock,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StoreDetailResponse {
    #[serde(flatten)]
    pub store: StoreResponse,
    pub inventory: Vec<InventoryResponse>,
}

impl From<StoreDetail> for StoreDetailResponse {
    fn from(d: StoreDetail) -> Self {
        Self {
            store: d.store.into(),
            inventory: d.inventory.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StoreSummaryResponse {
    pub id: StoreId,
    pub name: String,
}

impl From<StoreSummary> for StoreSummaryResponse {
    fn from(s: StoreSummary) -> Self {
        Self {
            id: s.id,
            name: s.name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAddressResponse {
    pub id: UserAddressId,
    pub is_primary: bool,
    pub address: AddressResponse,
}

impl From<UserAddress> for UserAddressResponse {
    fn from(ua: UserAddress) -> Self {
        Self {
            id: ua.id,
            is_primary: ua.is_primary,
            address: ua.address.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_accepts_numeric_or_string_price() {
        let a: CreateProductRequest =
            serde_json::from_str(r#"{"name":"Kopi","price":85000.5,"categoryIds":[]}"#).unwrap();
        let b: CreateProductRequest = serde_json::from_str(r#"{"price":"85000.50"}"#).unwrap();

        assert_eq!(a.price, b.price);
        assert_eq!(a.category_ids, Some(vec![]));
        assert!(b.name.is_none());
    }

    #[test]
    fn test_list_item_shape() {
        let product = Product {
            id: ProductId::new(),
            name: "Kopi".into(),
            description: "Arabica".into(),
            price: Decimal::new(8500000, 2),
            weight: 250,
            created_by: None,
            categories: vec![Category {
                id: CategoryId::new(),
                name: "Minuman".into(),
            }],
            stock: vec![StoreStock {
                store_id: StoreId::new(),
                store_name: "Jakarta".into(),
                stock: 3,
            }],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(ProductListItem::from(product)).unwrap();
        assert_eq!(json["price"], "85000.00");
        assert_eq!(json["category"][0], "Minuman");
        assert_eq!(json["totalStock"], 3);
        assert_eq!(json["stockPerStore"][0]["storeName"], "Jakarta");
    }
}

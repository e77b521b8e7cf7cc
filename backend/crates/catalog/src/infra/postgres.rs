//! PostgreSQL Repository Implementations

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use kernel::id::{ProductId, StoreId, UserId};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::address::{Address, UserAddress};
use crate::domain::product::{Category, NewProduct, Product, StoreProduct, StoreStock};
use crate::domain::repository::{AddressRepository, ProductRepository, StoreRepository};
use crate::domain::store::{InventoryItem, Store, StoreDetail, StoreSummary};
use crate::error::{CatalogError, CatalogResult, map_product_insert_error};

const PRODUCT_COLUMNS: &str = r#"
    id,
    name,
    description,
    price,
    weight,
    created_by,
    created_at,
    updated_at
"#;

const STORE_COLUMNS: &str = "id, name, created_at, updated_at";

/// `%term%` with LIKE metacharacters escaped (pairs with `ESCAPE '\'`).
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn group_by_key<V>(rows: impl IntoIterator<Item = (Uuid, V)>) -> HashMap<Uuid, Vec<V>> {
    let mut grouped: HashMap<Uuid, Vec<V>> = HashMap::new();
    for (key, value) in rows {
        grouped.entry(key).or_default().push(value);
    }
    grouped
}

/// One repository over the shared pool; implements every catalog port.
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attach categories and per-store stock to product rows in two queries.
    async fn hydrate(&self, rows: Vec<ProductRow>) -> CatalogResult<Vec<Product>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

        let categories = sqlx::query_as::<_, ProductCategoryRow>(
            r#"
            SELECT pc.product_id, c.id, c.name
            FROM product_categories pc
            JOIN categories c ON c.id = pc.category_id
            WHERE pc.product_id = ANY($1)
            ORDER BY c.name
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let stock = sqlx::query_as::<_, StoreStockRow>(
            r#"
            SELECT sp.product_id, sp.store_id, s.name AS store_name, sp.stock
            FROM store_products sp
            JOIN stores s ON s.id = sp.store_id
            WHERE sp.product_id = ANY($1)
            ORDER BY s.name
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut categories = group_by_key(categories.into_iter().map(|r| {
            (
                r.product_id,
                Category {
                    id: r.id.into(),
                    name: r.name,
                },
            )
        }));
        let mut stock = group_by_key(stock.into_iter().map(|r| {
            (
                r.product_id,
                StoreStock {
                    store_id: r.store_id.into(),
                    store_name: r.store_name,
                    stock: r.stock,
                },
            )
        }));

        Ok(rows
            .into_iter()
            .map(|row| {
                let categories = categories.remove(&row.id).unwrap_or_default();
                let stock = stock.remove(&row.id).unwrap_or_default();
                row.into_product(categories, stock)
            })
            .collect())
    }

    /// Addresses linked to the given stores, keyed by store id.
    async fn store_addresses(&self, store_ids: &[Uuid]) -> CatalogResult<HashMap<Uuid, Vec<Address>>> {
        let rows = sqlx::query_as::<_, AddressRow>(
            r#"
            SELECT a.id, a.address_line, a.city, a.province, a.postal_code, sa.store_id
            FROM addresses a
            JOIN store_addresses sa ON sa.id = a.store_address_id
            WHERE sa.store_id = ANY($1)
            ORDER BY a.city, a.id
            "#,
        )
        .bind(store_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(group_by_key(rows.into_iter().filter_map(|row| {
            let store_id = row.store_id?;
            Some((store_id, row.into_address()))
        })))
    }
}

impl ProductRepository for PgCatalogRepository {
    async fn list(&self, search: Option<&str>) -> CatalogResult<Vec<Product>> {
        let sql = format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE $1::text IS NULL OR name ILIKE $1 ESCAPE '\'
            ORDER BY created_at DESC
            "#
        );
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(search.map(like_pattern))
            .fetch_all(&self.pool)
            .await?;

        self.hydrate(rows).await
    }

    async fn find_by_id(&self, id: &ProductId) -> CatalogResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(self.hydrate(vec![row]).await?.pop())
    }

    async fn exists_by_name(&self, name: &str) -> CatalogResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE name = $1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn create(&self, product: &NewProduct) -> CatalogResult<Product> {
        let category_ids: Vec<Uuid> = product.category_ids.iter().map(|id| id.into_uuid()).collect();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price, weight, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.weight)
        .bind(product.created_by.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(map_product_insert_error)?;

        sqlx::query(
            r#"
            INSERT INTO product_categories (product_id, category_id)
            SELECT $1, UNNEST($2::uuid[])
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&category_ids)
        .execute(&mut *tx)
        .await
        .map_err(map_product_insert_error)?;

        tx.commit().await?;

        ProductRepository::find_by_id(self, &product.id)
            .await?
            .ok_or_else(|| CatalogError::Internal("product vanished after insert".to_string()))
    }

    async fn link_to_store(
        &self,
        product_id: &ProductId,
        store_id: &StoreId,
        stock: i32,
    ) -> CatalogResult<StoreProduct> {
        let row = sqlx::query_as::<_, StoreProductRow>(
            r#"
            INSERT INTO store_products (id, product_id, store_id, stock)
            VALUES ($1, $2, $3, $4)
            RETURNING id, product_id, store_id, stock
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(product_id.as_uuid())
        .bind(store_id.as_uuid())
        .bind(stock)
        .fetch_one(&self.pool)
        .await
        .map_err(CatalogError::StoreLinkFailed)?;

        Ok(row.into_store_product())
    }
}

impl StoreRepository for PgCatalogRepository {
    async fn list(&self) -> CatalogResult<Vec<Store>> {
        let sql = format!("SELECT {STORE_COLUMNS} FROM stores ORDER BY name");
        let rows = sqlx::query_as::<_, StoreRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut addresses = self.store_addresses(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let addresses = addresses.remove(&row.id).unwrap_or_default();
                row.into_store(addresses)
            })
            .collect())
    }

    async fn list_summaries(&self) -> CatalogResult<Vec<StoreSummary>> {
        let rows = sqlx::query_as::<_, StoreSummaryRow>("SELECT id, name FROM stores ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| StoreSummary {
                id: r.id.into(),
                name: r.name,
            })
            .collect())
    }

    async fn find_by_id(&self, id: &StoreId) -> CatalogResult<Option<StoreDetail>> {
        let sql = format!("SELECT {STORE_COLUMNS} FROM stores WHERE id = $1");
        let Some(row) = sqlx::query_as::<_, StoreRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let addresses = self
            .store_addresses(&[row.id])
            .await?
            .remove(&row.id)
            .unwrap_or_default();

        let inventory = sqlx::query_as::<_, InventoryRow>(
            r#"
            SELECT sp.product_id, p.name AS product_name, sp.stock
            FROM store_products sp
            JOIN products p ON p.id = sp.product_id
            WHERE sp.store_id = $1
            ORDER BY p.name
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(StoreDetail {
            store: row.into_store(addresses),
            inventory: inventory
                .into_iter()
                .map(|r| InventoryItem {
                    product_id: r.product_id.into(),
                    product_name: r.product_name,
                    stock: r.stock,
                })
                .collect(),
        }))
    }

    async fn store_provinces(&self) -> CatalogResult<Vec<String>> {
        let provinces: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT province
            FROM addresses
            WHERE store_address_id IS NOT NULL AND province <> ''
            ORDER BY province
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(provinces)
    }
}

impl AddressRepository for PgCatalogRepository {
    async fn list_for_user(&self, user_id: &UserId) -> CatalogResult<Vec<UserAddress>> {
        let rows = sqlx::query_as::<_, UserAddressRow>(
            r#"
            SELECT
                ua.id AS user_address_id,
                ua.is_primary,
                a.id,
                a.address_line,
                a.city,
                a.province,
                a.postal_code,
                sa.store_id
            FROM user_addresses ua
            JOIN addresses a ON a.id = ua.address_id
            LEFT JOIN store_addresses sa ON sa.id = a.store_address_id
            WHERE ua.user_id = $1
            ORDER BY ua.is_primary DESC, a.city
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| UserAddress {
                id: row.user_address_id.into(),
                is_primary: row.is_primary,
                address: row.address.into_address(),
            })
            .collect())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    description: String,
    price: Decimal,
    weight: i32,
    created_by: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self, categories: Vec<Category>, stock: Vec<StoreStock>) -> Product {
        Product {
            id: self.id.into(),
            name: self.name,
            description: self.description,
            price: self.price,
            weight: self.weight,
            created_by: self.created_by.map(Into::into),
            categories,
            stock,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProductCategoryRow {
    product_id: Uuid,
    id: Uuid,
    name: String,
}

#[derive(sqlx::FromRow)]
struct StoreStockRow {
    product_id: Uuid,
    store_id: Uuid,
    store_name: String,
    stock: i32,
}

#[derive(sqlx::FromRow)]
struct StoreProductRow {
    id: Uuid,
    product_id: Uuid,
    store_id: Uuid,
    stock: i32,
}

impl StoreProductRow {
    fn into_store_product(self) -> StoreProduct {
        StoreProduct {
            id: self.id.into(),
            product_id: self.product_id.into(),
            store_id: self.store_id.into(),
            stock: self.stock,
        }
    }
}

#[derive(sqlx::FromRow)]
struct StoreRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl StoreRow {
    fn into_store(self, addresses: Vec<Address>) -> Store {
        Store {
            id: self.id.into(),
            name: self.name,
            addresses,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct StoreSummaryRow {
    id: Uuid,
    name: String,
}

#[derive(sqlx::FromRow)]
struct InventoryRow {
    product_id: Uuid,
    product_name: String,
    stock: i32,
}

#[derive(sqlx::FromRow)]
struct AddressRow {
    id: Uuid,
    address_line: String,
    city: String,
    province: String,
    postal_code: Option<String>,
    store_id: Option<Uuid>,
}

impl AddressRow {
    fn into_address(self) -> Address {
        Address {
            id: self.id.into(),
            address_line: self.address_line,
            city: self.city,
            province: self.province,
            postal_code: self.postal_code,
            store_id: self.store_id.map(Into::into),
        }
    }
}

#[derive(sqlx::FromRow)]
struct UserAddressRow {
    user_address_id: Uuid,
    is_primary: bool,
    #[sqlx(flatten)]
    address: AddressRow,
}

//! Repository Traits

use kernel::id::{ProductId, StoreId, UserId};

use crate::domain::address::UserAddress;
use crate::domain::product::{NewProduct, Product, StoreProduct};
use crate::domain::store::{Store, StoreDetail, StoreSummary};
use crate::error::CatalogResult;

#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    /// Case-insensitive substring match on name when `search` is given.
    async fn list(&self, search: Option<&str>) -> CatalogResult<Vec<Product>>;

    async fn find_by_id(&self, id: &ProductId) -> CatalogResult<Option<Product>>;

    async fn exists_by_name(&self, name: &str) -> CatalogResult<bool>;

    /// Insert the product and its category links atomically.
    async fn create(&self, product: &NewProduct) -> CatalogResult<Product>;

    /// Insert the inventory row. Failure leaves the product in place.
    async fn link_to_store(
        &self,
        product_id: &ProductId,
        store_id: &StoreId,
        stock: i32,
    ) -> CatalogResult<StoreProduct>;
}

#[trait_variant::make(StoreRepository: Send)]
pub trait LocalStoreRepository {
    async fn list(&self) -> CatalogResult<Vec<Store>>;

    async fn list_summaries(&self) -> CatalogResult<Vec<StoreSummary>>;

    async fn find_by_id(&self, id: &StoreId) -> CatalogResult<Option<StoreDetail>>;

    /// Province of every address linked to a store.
    async fn store_provinces(&self) -> CatalogResult<Vec<String>>;
}

#[trait_variant::make(AddressRepository: Send)]
pub trait LocalAddressRepository {
    /// Primary address first.
    async fn list_for_user(&self, user_id: &UserId) -> CatalogResult<Vec<UserAddress>>;
}

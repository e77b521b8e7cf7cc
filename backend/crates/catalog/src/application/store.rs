//! Store and province lookups

use std::sync::Arc;

use kernel::id::StoreId;

use crate::domain::address::distinct_provinces;
use crate::domain::repository::StoreRepository;
use crate::domain::store::{Store, StoreDetail, StoreSummary};
use crate::error::{CatalogError, CatalogResult};

/// Read-only store queries.
pub struct StoreQueries<S>
where
    S: StoreRepository,
{
    stores: Arc<S>,
}

impl<S> StoreQueries<S>
where
    S: StoreRepository,
{
    pub fn new(stores: Arc<S>) -> Self {
        Self { stores }
    }

    pub async fn list(&self) -> CatalogResult<Vec<Store>> {
        self.stores.list().await
    }

    pub async fn list_for_admin(&self) -> CatalogResult<Vec<StoreSummary>> {
        self.stores.list_summaries().await
    }

    pub async fn get(&self, raw_id: &str) -> CatalogResult<StoreDetail> {
        let id: StoreId = raw_id.parse()?;
        self.stores
            .find_by_id(&id)
            .await?
            .ok_or(CatalogError::StoreNotFound)
    }

    pub async fn provinces(&self) -> CatalogResult<Vec<String>> {
        let provinces = self.stores.store_provinces().await?;
        Ok(distinct_provinces(provinces.iter().map(String::as_str)))
    }
}

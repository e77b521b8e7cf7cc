//! Product use cases

use std::sync::Arc;

use kernel::id::{ProductId, UserId};

use crate::domain::product::{NewProduct, Product, ProductDraft, StoreProduct};
use crate::domain::repository::ProductRepository;
use crate::error::{CatalogError, CatalogResult};

pub struct ListProductsUseCase<P>
where
    P: ProductRepository,
{
    products: Arc<P>,
}

impl<P> ListProductsUseCase<P>
where
    P: ProductRepository,
{
    pub fn new(products: Arc<P>) -> Self {
        Self { products }
    }

    pub async fn execute(&self, search: Option<&str>) -> CatalogResult<Vec<Product>> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        self.products.list(search).await
    }
}

pub struct GetProductUseCase<P>
where
    P: ProductRepository,
{
    products: Arc<P>,
}

impl<P> GetProductUseCase<P>
where
    P: ProductRepository,
{
    pub fn new(products: Arc<P>) -> Self {
        Self { products }
    }

    pub async fn execute(&self, raw_id: &str) -> CatalogResult<Product> {
        let id: ProductId = raw_id.parse()?;
        self.products
            .find_by_id(&id)
            .await?
            .ok_or(CatalogError::ProductNotFound)
    }
}

pub struct CreateProductOutput {
    pub product: Product,
    pub store_product: StoreProduct,
}

pub struct CreateProductUseCase<P>
where
    P: ProductRepository,
{
    products: Arc<P>,
}

impl<P> CreateProductUseCase<P>
where
    P: ProductRepository,
{
    pub fn new(products: Arc<P>) -> Self {
        Self { products }
    }

    /// Validate, check the name, write product + categories, then link the
    /// store. The two writes are independent: a failed link keeps the product.
    pub async fn execute(
        &self,
        draft: ProductDraft,
        created_by: UserId,
    ) -> CatalogResult<CreateProductOutput> {
        let new_product = NewProduct::from_draft(draft, created_by)?;

        if self.products.exists_by_name(&new_product.name).await? {
            return Err(CatalogError::DuplicateProductName);
        }

        let product = self.products.create(&new_product).await?;

        let store_product = self
            .products
            .link_to_store(&product.id, &new_product.store_id, new_product.stock)
            .await?;

        tracing::info!(
            product_id = %product.id,
            store_id = %store_product.store_id,
            created_by = %created_by,
            "Product created"
        );

        Ok(CreateProductOutput {
            product,
            store_product,
        })
    }
}

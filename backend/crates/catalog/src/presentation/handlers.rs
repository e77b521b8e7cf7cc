//! HTTP Handlers

use std::sync::Arc;

use auth::middleware::CurrentUser;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::WithRejection;
use kernel::response::ApiResponse;

use crate::application::{
    CreateProductUseCase, GetProductUseCase, ListProductsUseCase, ListUserAddressesUseCase,
    StoreQueries,
};
use crate::domain::repository::{AddressRepository, ProductRepository, StoreRepository};
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::dto::{
    CreateProductRequest, CreateProductResponse, ProductDetailResponse, ProductListItem,
    SearchQuery, StoreDetailResponse, StoreResponse, StoreSummaryResponse, UserAddressResponse,
};

/// Shared state for catalog handlers
pub struct CatalogAppState<R> {
    pub repo: Arc<R>,
}

impl<R> Clone for CatalogAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

// ============================================================================
// Products
// ============================================================================

/// GET /products?search=
pub async fn list_products<R>(
    State(state): State<CatalogAppState<R>>,
    Query(query): Query<SearchQuery>,
) -> CatalogResult<Json<ApiResponse<Vec<ProductListItem>>>>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let products = ListProductsUseCase::new(state.repo.clone())
        .execute(query.search.as_deref())
        .await?;

    Ok(Json(ApiResponse::data(
        products.into_iter().map(Into::into).collect(),
    )))
}

/// GET /products/{id}
pub async fn get_product<R>(
    State(state): State<CatalogAppState<R>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<ApiResponse<ProductDetailResponse>>>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let product = GetProductUseCase::new(state.repo.clone()).execute(&id).await?;
    Ok(Json(ApiResponse::data(product.into())))
}

/// POST /products (session + SUPER_ADMIN)
pub async fn create_product<R>(
    State(state): State<CatalogAppState<R>>,
    CurrentUser(claims): CurrentUser,
    WithRejection(Json(req), _): WithRejection<Json<CreateProductRequest>, CatalogError>,
) -> CatalogResult<impl IntoResponse>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let output = CreateProductUseCase::new(state.repo.clone())
        .execute(req.into(), claims.sub)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_data(
            "Product created successfully and linked to the store",
            CreateProductResponse {
                product: output.product.into(),
                store_product: output.store_product.into(),
            },
        )),
    ))
}

// ============================================================================
// Stores
// ============================================================================

/// GET /stores
pub async fn list_stores<R>(
    State(state): State<CatalogAppState<R>>,
) -> CatalogResult<Json<ApiResponse<Vec<StoreResponse>>>>
where
    R: StoreRepository + Send + Sync + 'static,
{
    let stores = StoreQueries::new(state.repo.clone()).list().await?;
    Ok(Json(ApiResponse::with_data(
        "Stores fetched.",
        stores.into_iter().map(Into::into).collect(),
    )))
}

/// GET /stores/admin (session + SUPER_ADMIN)
pub async fn list_admin_stores<R>(
    State(state): State<CatalogAppState<R>>,
) -> CatalogResult<Json<ApiResponse<Vec<StoreSummaryResponse>>>>
where
    R: StoreRepository + Send + Sync + 'static,
{
    let stores = StoreQueries::new(state.repo.clone()).list_for_admin().await?;
    Ok(Json(ApiResponse::data(
        stores.into_iter().map(Into::into).collect(),
    )))
}

/// GET /stores/{store_id}
pub async fn get_store<R>(
    State(state): State<CatalogAppState<R>>,
    Path(store_id): Path<String>,
) -> CatalogResult<Json<ApiResponse<StoreDetailResponse>>>
where
    R: StoreRepository + Send + Sync + 'static,
{
    let store = StoreQueries::new(state.repo.clone()).get(&store_id).await?;
    Ok(Json(ApiResponse::with_data(
        format!("Get {} success", store.store.id),
        store.into(),
    )))
}

// ============================================================================
// Addresses
// ============================================================================

/// GET /addresses (bearer)
pub async fn list_user_addresses<R>(
    State(state): State<CatalogAppState<R>>,
    CurrentUser(claims): CurrentUser,
) -> CatalogResult<Json<ApiResponse<Vec<UserAddressResponse>>>>
where
    R: AddressRepository + Send + Sync + 'static,
{
    let addresses = ListUserAddressesUseCase::new(state.repo.clone())
        .execute(&claims.sub)
        .await?;

    Ok(Json(ApiResponse::data(
        addresses.into_iter().map(Into::into).collect(),
    )))
}

/// GET /addresses/provinces
pub async fn list_store_provinces<R>(
    State(state): State<CatalogAppState<R>>,
) -> CatalogResult<Json<ApiResponse<Vec<String>>>>
where
    R: StoreRepository + Send + Sync + 'static,
{
    let provinces = StoreQueries::new(state.repo.clone()).provinces().await?;
    Ok(Json(ApiResponse::data(provinces)))
}

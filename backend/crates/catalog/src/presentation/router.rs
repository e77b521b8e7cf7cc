//! Catalog Router

use std::sync::Arc;

use auth::middleware::{AuthGate, RoleGuard, require_bearer, require_role, require_session};
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::domain::repository::{AddressRepository, ProductRepository, StoreRepository};
use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{self, CatalogAppState};

/// Create the catalog router with the PostgreSQL repository
pub fn catalog_router(repo: PgCatalogRepository, gate: AuthGate) -> Router {
    catalog_router_generic(repo, gate)
}

/// Create a generic catalog router for any repository implementation
///
/// Serves `/products`, `/stores` and `/addresses`; merge it at the root.
pub fn catalog_router_generic<R>(repo: R, gate: AuthGate) -> Router
where
    R: ProductRepository + StoreRepository + AddressRepository + Send + Sync + 'static,
{
    let state = CatalogAppState {
        repo: Arc::new(repo),
    };
    let super_admin = RoleGuard::super_admin();

    let create_product = post(handlers::create_product::<R>)
        .layer(from_fn_with_state(super_admin.clone(), require_role))
        .layer(from_fn_with_state(gate.clone(), require_session));

    let admin_stores = get(handlers::list_admin_stores::<R>)
        .layer(from_fn_with_state(super_admin, require_role))
        .layer(from_fn_with_state(gate.clone(), require_session));

    let user_addresses = get(handlers::list_user_addresses::<R>)
        .layer(from_fn_with_state(gate, require_bearer));

    Router::new()
        .route(
            "/products",
            get(handlers::list_products::<R>).merge(create_product),
        )
        .route("/products/{id}", get(handlers::get_product::<R>))
        .route("/stores", get(handlers::list_stores::<R>))
        .route("/stores/admin", admin_stores)
        .route("/stores/{store_id}", get(handlers::get_store::<R>))
        .route("/addresses", user_addresses)
        .route("/addresses/provinces", get(handlers::list_store_provinces::<R>))
        .with_state(state)
}

//! Shipping Router

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::domain::provider::ShippingRates;
use crate::infra::rajaongkir::RajaOngkirClient;
use crate::presentation::handlers::{self, ShippingAppState};

/// Create the shipping router backed by RajaOngkir
pub fn shipping_router(client: RajaOngkirClient) -> Router {
    shipping_router_generic(client)
}

/// Create a shipping router for any rate provider; nest it under `/shipping`.
pub fn shipping_router_generic<P>(rates: P) -> Router
where
    P: ShippingRates + Send + Sync + 'static,
{
    let state = ShippingAppState {
        rates: Arc::new(rates),
    };

    Router::new()
        .route("/provinces", get(handlers::list_provinces::<P>))
        .route("/cities", get(handlers::list_cities::<P>))
        .route("/cities/{city_id}", get(handlers::get_city::<P>))
        .route("/cost", post(handlers::calculate_cost::<P>))
        .with_state(state)
}

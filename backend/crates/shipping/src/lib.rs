//! Shipping Backend Module
//!
//! Stateless proxy to the RajaOngkir rate API.
//!
//! - `domain/` - Provinces, cities, cost models and the provider trait
//! - `infra/` - RajaOngkir HTTP client
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


pub use config::ShippingConfig;
pub use error::{ShippingError, ShippingResult};
pub use infra::rajaongkir::RajaOngkirClient;
pub use presentation::router::{shipping_router, shipping_router_generic};

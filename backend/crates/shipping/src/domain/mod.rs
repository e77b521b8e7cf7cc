//! Domain Layer
//!
//! Rate-lookup models and the provider port.

pub mod model;
pub mod provider;

pub use model::{City, CostQuery, CostValue, Province, ServiceCost};
pub use provider::ShippingRates;

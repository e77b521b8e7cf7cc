//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::ShippingAppState;
pub use router::{shipping_router, shipping_router_generic};

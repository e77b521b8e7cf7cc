//! Infrastructure Layer

pub mod rajaongkir;

pub use rajaongkir::RajaOngkirClient;

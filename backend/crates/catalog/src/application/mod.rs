//! Application Layer
//!
//! Use cases over the catalog repositories.

pub mod address;
pub mod product;
pub mod store;

pub use address::ListUserAddressesUseCase;
pub use product::{CreateProductOutput, CreateProductUseCase, GetProductUseCase, ListProductsUseCase};
pub use store::StoreQueries;

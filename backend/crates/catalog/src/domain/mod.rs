//! Domain Layer
//!
//! Catalog entities and repository ports.

pub mod address;
pub mod product;
pub mod repository;
pub mod store;

pub use address::{Address, UserAddress};
pub use product::{Category, NewProduct, Product, ProductDraft, StoreProduct, StoreStock};
pub use repository::{AddressRepository, ProductRepository, StoreRepository};
pub use store::{InventoryItem, Store, StoreDetail, StoreSummary};

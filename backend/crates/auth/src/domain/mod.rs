//! Domain Layer
//!
//! Entities, value objects, and the ports the application layer depends on.

pub mod entity {
    pub mod user;
}
pub mod identity;
pub mod mailer;
pub mod repository;
pub mod value_object;

pub use entity::user::User;
pub use identity::{FederatedProfile, IdentityProvider};
pub use mailer::{Mailer, OutgoingEmail};
pub use repository::UserRepository;

//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::AuthResult;

#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user. A duplicate email or username is
    /// `AuthError::UserAlreadyExists`.
    async fn create(&self, user: &User) -> AuthResult<()>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Match on username OR email; either may be absent.
    async fn find_by_login(
        &self,
        user_name: Option<&UserName>,
        email: Option<&Email>,
    ) -> AuthResult<Option<User>>;

    async fn exists_by_user_name_or_email(
        &self,
        user_name: &UserName,
        email: &Email,
    ) -> AuthResult<bool>;

    /// Persist the mutable columns (login time, verification state, token).
    async fn update(&self, user: &User) -> AuthResult<()>;
}

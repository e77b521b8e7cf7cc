//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, ports (repository, mailer, identity provider)
//! - `application/` - Use cases and the token service
//! - `infra/` - PostgreSQL, Resend and Google adapters
//! - `presentation/` - HTTP handlers, DTOs, pages, router, session gates
//!
//! ## Features
//! - Registration with email verification
//! - Login by username or email with a JWT session cookie
//! - Google sign-in (authorization code flow)
//! - Cookie and bearer session gates, role gate for admin routes
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Sessions are stateless HS256 JWTs; logout clears the cookie only
//! - OAuth `state` is bound to a short-lived cookie and compared in constant time

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::SessionClaims;
pub use domain::value_object::user_role::UserRole;
pub use error::{AuthError, AuthResult};
pub use infra::google::{GoogleIdentityProvider, GoogleOAuthConfig};
pub use infra::postgres::PgAuthRepository;
pub use infra::resend::{ResendConfig, ResendMailer};
pub use presentation::router::{auth_router, auth_router_generic};

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

//! Presentation Layer
//!
//! HTTP handlers, DTOs, pages, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{AuthGate, CurrentUser, RoleGuard, require_bearer, require_role, require_session};
pub use router::{auth_router, auth_router_generic};

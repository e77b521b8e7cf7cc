//! Infrastructure Layer
//!
//! PostgreSQL persistence and outbound HTTP clients.

pub mod google;
pub mod postgres;
pub mod resend;

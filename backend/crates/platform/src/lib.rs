//! Platform - technical building blocks shared by the feature crates
//!
//! - Password hashing (Argon2id) and password policy
//! - Signed session/verification tokens (HS256 JWT)
//! - Set-Cookie construction and cookie lookup
//! - Random tokens for OAuth state

pub mod cookie;
pub mod crypto;
pub mod jwt;
pub mod password;

//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod email;
pub mod federated_login;
pub mod login;
pub mod register;
pub mod token;
pub mod verify_email;

pub use federated_login::FederatedLoginUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use token::{SessionClaims, TokenService, VerificationClaims};
pub use verify_email::VerifyEmailUseCase;

//! Auth Router

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::identity::IdentityProvider;
use crate::domain::mailer::Mailer;
use crate::domain::repository::UserRepository;
use crate::infra::google::GoogleIdentityProvider;
use crate::infra::postgres::PgAuthRepository;
use crate::infra::resend::ResendMailer;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with the production adapters
pub fn auth_router(
    repo: PgAuthRepository,
    mailer: ResendMailer,
    identity: GoogleIdentityProvider,
    config: AuthConfig,
) -> Router {
    auth_router_generic(repo, mailer, identity, config)
}

/// Create a generic Auth router for any adapter implementations
pub fn auth_router_generic<R, M, P>(repo: R, mailer: M, identity: P, config: AuthConfig) -> Router
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
    P: IdentityProvider + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        mailer: Arc::new(mailer),
        identity: Arc::new(identity),
        tokens: Arc::new(TokenService::new(&config)),
        config: Arc::new(config),
    };

    Router::new()
        .route("/register", post(handlers::register::<R, M, P>))
        .route("/login", post(handlers::login::<R, M, P>))
        .route("/logout", post(handlers::logout::<R, M, P>))
        .route("/verify-email", get(handlers::verify_email::<R, M, P>))
        .route("/verify-success", get(handlers::verify_success::<R, M, P>))
        .route("/google", get(handlers::google_login::<R, M, P>))
        .route("/google/callback", get(handlers::google_callback::<R, M, P>))
        .route("/login/success", get(handlers::login_success::<R, M, P>))
        .route("/login/failed", get(handlers::login_failed))
        .with_state(state)
}

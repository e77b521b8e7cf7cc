//! API Server Entry Point
//!
//! Loads configuration, connects and migrates the database, then serves
//! `/auth`, `/shipping` and the catalog routes. Startup errors use `anyhow`;
//! request errors go through each crate's error enum and `kernel::AppError`.

mod config;

use std::net::SocketAddr;

use auth::middleware::AuthGate;
use auth::{GoogleIdentityProvider, PgAuthRepository, ResendMailer, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use catalog::{PgCatalogRepository, catalog_router};
use shipping::{RajaOngkirClient, shipping_router};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,catalog=info,shipping=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Outbound clients
    let mailer = ResendMailer::new(config.resend)?;
    let google = GoogleIdentityProvider::new(config.google)?;
    let rates = RajaOngkirClient::new(config.shipping)?;

    // Catalog routes share the session/bearer gate with auth
    let gate = AuthGate::new(&config.auth);

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest(
            "/auth",
            auth_router(PgAuthRepository::new(pool.clone()), mailer, google, config.auth),
        )
        .nest("/shipping", shipping_router(rates))
        .merge(catalog_router(PgCatalogRepository::new(pool), gate))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

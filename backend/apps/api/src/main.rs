//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod app;
mod config;
mod logging;

use auth::PgAuthRepository;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use todo::{InMemoryStore, PgTodoRepository};
use tokio::net::TcpListener;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env()?;

    // Initialize tracing; the guard flushes the log file on shutdown
    let _log_guard = logging::init(&config.log_dir)?;

    if config.ephemeral_secret {
        tracing::warn!("SESSION_SECRET not set, using a random secret");
    }

    let router = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            app::build(
                PgAuthRepository::new(pool.clone()),
                PgTodoRepository::new(pool),
                config.auth.clone(),
            )
            .await
        }
        None => {
            tracing::warn!("DATABASE_URL not set, data is kept in memory only");
            let store = InMemoryStore::new();
            app::build(store.clone(), store, config.auth.clone()).await
        }
    };

    let app = app::with_layers(router, config.frontend_origins.clone());

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

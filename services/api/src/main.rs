use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod middleware;
mod models;
mod repositories;
mod routes;
mod state;
mod validation;

use common::database::{DatabaseConfig, close_shared_pool, health_check, shared_pool};
use tokio::net::TcpListener;

use crate::{config::AppConfig, middleware::JwtVerifier, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting onboarding API service");

    let app_config = AppConfig::load()?;
    let jwt_verifier = JwtVerifier::from_config(&app_config)?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = shared_pool(&db_config).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    let app_state = AppState::new(pool, jwt_verifier);

    // Start the web server
    let app = routes::create_router(app_state);

    let address = app_config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Onboarding API service listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    close_shared_pool().await;
    info!("Onboarding API service stopped");

    Ok(())
}

async fn shutdown_signal() {
    wait_for_signal(tokio::signal::ctrl_c()).await;
}

/// Resolves once `signal` fires. If the signal handler cannot be installed the
/// server keeps running instead of shutting down at once.
async fn wait_for_signal(signal: impl Future<Output = std::io::Result<()>>) {
    if let Err(e) = signal.await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

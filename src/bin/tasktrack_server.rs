//! HTTP server for the task API backed by `PostgreSQL`.
//!
//! Configuration comes from the environment (see [`tasktrack::config`]).
//! The `tasks` table is created on start-up when it does not exist.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use std::sync::Arc;
use tasktrack::config::{AppConfig, ConfigError};
use tasktrack::http::{AppState, router};
use tasktrack::task::adapters::postgres::PostgresTaskRepository;
use tasktrack::task::ports::TaskRepositoryError;
use thiserror::Error;

/// Errors that stop the server.
#[derive(Debug, Error)]
enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] tracing_subscriber::util::TryInitError),
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("failed to prepare schema: {0}")]
    Schema(#[from] TaskRepositoryError),
    #[error("server i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let config = AppConfig::from_env()?;
    tasktrack::telemetry::init(&config.log_filter)?;

    let manager = ConnectionManager::<PgConnection>::new(&config.database_url);
    let pool = Pool::builder()
        .max_size(config.pool_max_size)
        .build(manager)?;
    let repository = PostgresTaskRepository::new(pool);
    repository.ensure_schema().await?;

    let app = router(AppState::from_parts(
        Arc::new(repository),
        Arc::new(DefaultClock),
    ));
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "task server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("task server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
    }
}

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::migrate::MigrateError;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::constants::{API_NAME, DATABASE_NAME};
use crate::handlers::{car, health};
use crate::repository::{CarRepository, PgCarRepository};

/// Failures that stop the process before it accepts traffic.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Invalid database URL")]
    InvalidDatabaseUrl(#[source] sqlx::Error),

    #[error("Failed to connect to database")]
    Connect(#[source] sqlx::Error),

    #[error("Database health check failed")]
    HealthCheck(#[source] sqlx::Error),

    #[error("Failed to run migrations")]
    Migrate(#[from] MigrateError),
}

/// Opens the car collection: connects, checks liveness and ensures the schema.
pub async fn connect(config: &Config) -> Result<PgPool, StartupError> {
    let options = PgConnectOptions::from_str(&config.database_url)
        .map_err(StartupError::InvalidDatabaseUrl)?
        .database(DATABASE_NAME);

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect_with(options)
        .await
        .map_err(StartupError::Connect)?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .map_err(StartupError::HealthCheck)?;

    tracing::info!("{} Connected to database {}", API_NAME, DATABASE_NAME);

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!("{} Database migrations completed", API_NAME);
    Ok(pool)
}

/// Builds the route table over the given car repository.
pub fn router(cars: Arc<dyn CarRepository>) -> Router {
    Router::new()
        .merge(car::router())
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(cars)
}

/// Runs the service until a shutdown signal arrives, then closes the pool.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let pool = connect(&config).await?;
    let app = router(Arc::new(PgCarRepository::new(pool.clone())));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("{} Server listening on {}", API_NAME, addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("{} Shutting down, closing database connections", API_NAME);
    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("{} Failed to listen for Ctrl-C: {}", API_NAME, e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("{} Failed to listen for SIGTERM: {}", API_NAME, e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn startup_error_leaves_cause_to_source_chain() {
        let err = StartupError::HealthCheck(sqlx::Error::PoolTimedOut);

        assert_eq!(err.to_string(), "Database health check failed");
        let cause = err.source().unwrap().to_string();
        assert_eq!(cause, sqlx::Error::PoolTimedOut.to_string());

        let report = format!("{:#}", anyhow::Error::new(err).context("Car API server failed"));
        assert_eq!(report.matches(cause.as_str()).count(), 1);
    }
}

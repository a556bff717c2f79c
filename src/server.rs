//! Process wiring: storage, router, listener and shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::adapters::http::{app_router, HealthState, PollHandlers};
use crate::adapters::postgres::{connect_pool, run_migrations, PostgresPollRepository};
use crate::config::{AppConfig, ValidationError};
use crate::domain::foundation::DomainError;

/// Errors that stop the server from starting or running.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ValidationError),

    #[error("Database unavailable: {0}")]
    Database(#[from] DomainError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Connects storage, builds the router and serves until a shutdown signal.
pub async fn run(config: AppConfig) -> Result<(), ServerError> {
    config.validate()?;

    info!(
        environment = config.server.environment.as_str(),
        version = env!("CARGO_PKG_VERSION"),
        "Starting poll API"
    );

    let pool = connect_pool(&config.database).await?;
    if config.database.run_migrations {
        run_migrations(&pool).await?;
    }

    let repository = Arc::new(PostgresPollRepository::new(pool.clone()));
    let router = app_router(
        PollHandlers::from_repository(repository.clone()),
        HealthState::new(repository, config.server.environment.as_str()),
        &config.cors,
        config.server.request_timeout(),
    );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Server listening");

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    pool.close().await;
    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
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

//! Connection pool bootstrap.
//!
//! The pool is built once at startup and handed to the repository; nothing
//! in the crate holds a global handle.

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;

/// Connects to PostgreSQL, retrying with linear backoff.
///
/// Attempt `n` that fails waits `n * retry_delay` before the next one.
/// Gives up after `connect_retries` attempts.
///
/// # Errors
///
/// - `DatabaseError` carrying the last connection failure
pub async fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    let max_attempts = config.connect_retries.max(1);
    let mut attempt = 1;

    loop {
        info!(attempt, max_attempts, "Connecting to database");

        let result = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .idle_timeout(Some(config.idle_timeout()))
            .max_lifetime(Some(config.max_lifetime()))
            .connect(&config.url)
            .await;

        match result {
            Ok(pool) => {
                info!(
                    attempts = attempt,
                    max_connections = config.max_connections,
                    "Database connection established"
                );
                return Ok(pool);
            }
            Err(e) if attempt < max_attempts => {
                let delay = config.backoff(attempt);
                warn!(
                    attempt,
                    max_attempts,
                    error = %e,
                    delay_secs = delay.as_secs(),
                    "Database connection attempt failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                return Err(DomainError::database(
                    &format!("connect to database after {} attempts", attempt),
                    e,
                ));
            }
        }
    }
}

/// Applies the embedded schema migrations.
///
/// # Errors
///
/// - `DatabaseError` if a migration fails
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::database("run migrations", e))?;
    info!("Database migrations applied");
    Ok(())
}

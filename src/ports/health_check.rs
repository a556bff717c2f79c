//! Health check port.
//!
//! Lets the HTTP probes ask the storage adapter whether it can serve
//! traffic without knowing which adapter is wired in.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::DomainError;

/// Storage liveness and pool statistics.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Round-trips to the store.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if the store cannot be reached
    async fn ping(&self) -> Result<(), DomainError>;

    /// Connection pool statistics, when the adapter has a pool.
    fn pool_stats(&self) -> Option<PoolStats>;
}

/// Snapshot of a connection pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    /// Open connections, idle or in use.
    pub open_connections: u32,
    /// Connections currently checked out.
    pub in_use: u32,
    /// Connections waiting in the pool.
    pub idle: u32,
    /// Configured upper bound.
    pub max_connections: u32,
}

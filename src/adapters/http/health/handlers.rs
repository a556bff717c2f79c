//! Health, liveness and readiness probes.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::Response};
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::adapters::http::response::{respond, ApiResponse};
use crate::domain::foundation::Timestamp;
use crate::ports::{HealthCheck, PoolStats};

/// Crate version reported by `/health`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone)]
pub struct HealthState {
    probe: Arc<dyn HealthCheck>,
    started_at: Instant,
    environment: String,
}

impl HealthState {
    pub fn new(probe: Arc<dyn HealthCheck>, environment: impl Into<String>) -> Self {
        Self {
            probe,
            started_at: Instant::now(),
            environment: environment.into(),
        }
    }
}

/// Body of `/health`.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub timestamp: String,
    pub uptime_secs: u64,
    pub version: &'static str,
    pub environment: String,
    pub database: DatabaseReport,
}

#[derive(Debug, Serialize)]
pub struct DatabaseReport {
    pub status: &'static str,
    #[serde(flatten)]
    pub pool: Option<PoolStats>,
}

/// Body of `/live` and `/ready`.
#[derive(Debug, Serialize)]
pub struct ProbeReport {
    pub status: &'static str,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub checks: BTreeMap<&'static str, &'static str>,
}

/// GET /health - Service and database status
///
/// Always 200; a failing database shows up in the body only.
pub async fn health(State(state): State<HealthState>) -> Response {
    let database = match state.probe.ping().await {
        Ok(()) => DatabaseReport {
            status: "healthy",
            pool: state.probe.pool_stats(),
        },
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            DatabaseReport {
                status: "unhealthy",
                pool: None,
            }
        }
    };

    let report = HealthReport {
        status: "healthy",
        timestamp: Timestamp::now().to_rfc3339(),
        uptime_secs: state.started_at.elapsed().as_secs(),
        version: VERSION,
        environment: state.environment.clone(),
        database,
    };

    respond(StatusCode::OK, ApiResponse::data(report))
}

/// GET /live - Process is up
pub async fn live() -> Response {
    respond(
        StatusCode::OK,
        ApiResponse::data(ProbeReport {
            status: "alive",
            checks: BTreeMap::new(),
        }),
    )
}

/// GET /ready - Able to serve traffic; 503 when the database is unreachable
pub async fn ready(State(state): State<HealthState>) -> Response {
    let mut checks = BTreeMap::new();
    checks.insert("api", "ready");

    let database_ok = match state.probe.ping().await {
        Ok(()) => {
            if let Some(stats) = state.probe.pool_stats() {
                debug!(
                    open_connections = stats.open_connections,
                    in_use = stats.in_use,
                    idle = stats.idle,
                    "Database pool stats"
                );
            }
            true
        }
        Err(e) => {
            error!(error = %e, "Readiness check failed");
            false
        }
    };
    checks.insert("database", if database_ok { "healthy" } else { "unhealthy" });

    if database_ok {
        respond(
            StatusCode::OK,
            ApiResponse::data(ProbeReport {
                status: "ready",
                checks,
            }),
        )
    } else {
        let mut body = ApiResponse::data(ProbeReport {
            status: "not ready",
            checks,
        });
        body.success = false;
        respond(StatusCode::SERVICE_UNAVAILABLE, body)
    }
}

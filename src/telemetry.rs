//! Tracing subscriber setup.

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter,
};

use crate::config::ServerConfig;

/// Installs the global subscriber.
///
/// `RUST_LOG` overrides `server.log_level`. Production emits JSON lines;
/// other environments get human-readable output.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(server: &ServerConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry
            .with(fmt::layer().json().with_current_span(true).with_target(true))
            .try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    }
}

//! HTTP adapters - REST API implementations.
//!
//! Each area has its own sub-module with handlers and routes; `app_router`
//! mounts them and wraps the whole tree in the shared middleware stack.

pub mod health;
pub mod poll;
pub mod response;
pub mod voter;

use std::time::Duration;

use axum::{extract::Request, http::{HeaderName, HeaderValue, Method}, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::config::CorsConfig;

// Re-export key types for convenience
pub use health::HealthState;
pub use poll::{poll_routes, PollHandlers};
pub use response::ApiResponse;
pub use voter::VoterIdentity;

/// Mount point of the poll API.
pub const POLLS_PATH: &str = "/api/v1/polls";

/// Builds the full application router.
///
/// Middleware, outermost first: request id, tracing, request id
/// propagation, timeout, CORS.
pub fn app_router(
    polls: PollHandlers,
    health_state: HealthState,
    cors: &CorsConfig,
    request_timeout: Duration,
) -> Router {
    let probes = Router::new()
        .route("/health", get(health::health))
        .route("/live", get(health::live))
        .route("/ready", get(health::ready))
        .with_state(health_state);

    probes.nest(POLLS_PATH, poll_routes(polls)).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                }),
            )
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TimeoutLayer::new(request_timeout))
            .layer(cors_layer(cors)),
    )
}

/// Translates the CORS section into a tower-http layer.
///
/// Entries that are not valid header values are skipped with a warning.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(parse_all::<HeaderValue>("origin", config.origins()))
    };

    info!(
        allowed_origins = ?config.origins(),
        allow_credentials = config.allow_credentials,
        "CORS configured"
    );

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(parse_all::<Method>("method", config.methods()))
        .allow_headers(parse_all::<HeaderName>("header", config.headers()))
        .expose_headers(parse_all::<HeaderName>("exposed header", config.exposed()))
        .allow_credentials(config.allow_credentials)
        .max_age(config.max_age())
}

fn parse_all<T: std::str::FromStr>(kind: &str, values: Vec<String>) -> Vec<T> {
    values
        .into_iter()
        .filter_map(|value| match value.parse::<T>() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                warn!(kind, value = %value, "Ignoring invalid CORS entry");
                None
            }
        })
        .collect()
}

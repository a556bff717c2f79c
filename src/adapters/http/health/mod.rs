//! HTTP adapter for health probes.

mod handlers;

pub use handlers::{
    health, live, ready, DatabaseReport, HealthReport, HealthState, ProbeReport, VERSION,
};

//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PollRepository` - Transactional storage for polls, options and votes
//! - `HealthCheck` - Storage reachability for readiness probes

mod health_check;
mod poll_repository;

pub use health_check::{HealthCheck, PoolStats};
pub use poll_repository::{ListOptions, PollRepository, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresPollRepository` - Polls, options and votes
//! - `connect_pool` / `run_migrations` - Startup wiring

mod poll_repository;
mod pool;

pub use poll_repository::PostgresPollRepository;
pub use pool::{connect_pool, run_migrations};

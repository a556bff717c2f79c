//! Adapters - Implementations of ports for specific technologies.
//!
//! - `postgres` - PostgreSQL storage (production)
//! - `memory` - In-memory storage (tests, local development)
//! - `http` - axum routes, extractors and middleware

pub mod http;
pub mod memory;
pub mod postgres;

//! Poll API - polls, one vote per voter, live tallies.
//!
//! Hexagonal layout: `domain` holds the rules, `ports` the storage
//! contracts, `application` one handler per operation, and `adapters` the
//! PostgreSQL, in-memory and HTTP implementations.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod server;
pub mod telemetry;

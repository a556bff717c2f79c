//! In-memory adapters for tests and local development.

mod poll_repository;

pub use poll_repository::InMemoryPollRepository;

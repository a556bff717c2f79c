//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `poll` - Poll lifecycle, voting rules and result tallies

pub mod foundation;
pub mod poll;

//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (create, vote, delete) are kept apart from query
//! handlers (results, listing).

pub mod handlers;

pub use handlers::{
    CastVoteCommand, CastVoteHandler, CreatePollCommand, CreatePollHandler, DeletePollCommand,
    DeletePollHandler, GetPollResultsHandler, GetPollResultsQuery, ListPollsHandler,
    ListPollsQuery,
};

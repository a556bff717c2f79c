//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod poll;

pub use poll::{
    CastVoteCommand, CastVoteHandler, CreatePollCommand, CreatePollHandler, DeletePollCommand,
    DeletePollHandler, GetPollResultsHandler, GetPollResultsQuery, ListPollsHandler,
    ListPollsQuery,
};

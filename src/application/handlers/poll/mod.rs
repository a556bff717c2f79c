//! Poll command and query handlers.
//!
//! Each handler owns an `Arc<dyn PollRepository>` and applies the business
//! rules for one operation before delegating storage work.

mod cast_vote;
mod create_poll;
mod delete_poll;
mod get_poll_results;
mod list_polls;

#[cfg(test)]
pub(crate) mod testing;

pub use cast_vote::{CastVoteCommand, CastVoteHandler};
pub use create_poll::{CreatePollCommand, CreatePollHandler};
pub use delete_poll::{DeletePollCommand, DeletePollHandler};
pub use get_poll_results::{GetPollResultsHandler, GetPollResultsQuery};
pub use list_polls::{ListPollsHandler, ListPollsQuery};

//! Poll module - polls, options, votes and tallies.

mod aggregate;
mod errors;
mod option;
mod results;
mod vote;

pub use aggregate::{
    Poll, PollDraft, MAX_OPTIONS, MAX_OPTION_LENGTH, MAX_QUESTION_LENGTH, MIN_OPTIONS,
    MIN_OPTION_LENGTH, MIN_QUESTION_LENGTH,
};
pub use errors::PollError;
pub use option::{contains_option, PollOption};
pub use results::{OptionResult, PollPage, PollResults, PollWithOptions};
pub use vote::{NewVote, Vote};

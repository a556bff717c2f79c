//! Read models composed from polls, options and votes.

use serde::Serialize;

use super::{Poll, PollOption};
use crate::domain::foundation::{OptionId, Percentage};

/// A poll together with its options in position order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollWithOptions {
    #[serde(flatten)]
    pub poll: Poll,
    pub options: Vec<PollOption>,
}

/// One option with its share of the poll's votes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionResult {
    #[serde(flatten)]
    pub option: PollOption,
    pub percentage: Percentage,
}

/// Live tally of a poll as seen by one voter.
///
/// Serializes with the poll's own fields at the top level, next to
/// `options`, `has_voted` and `voted_option`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollResults {
    #[serde(flatten)]
    pub poll: Poll,
    pub options: Vec<OptionResult>,
    /// Same value as the flattened `poll.total_votes`.
    #[serde(skip_serializing)]
    pub total_votes: u64,
    pub has_voted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voted_option: Option<OptionId>,
}

impl PollResults {
    /// Computes per-option percentages against the poll total.
    ///
    /// `voted_option` is the caller's own vote, if any.
    pub fn tally(poll: Poll, options: Vec<PollOption>, voted_option: Option<OptionId>) -> Self {
        let total_votes = poll.total_votes();
        let options = options
            .into_iter()
            .map(|option| OptionResult {
                percentage: Percentage::of(option.vote_count(), total_votes),
                option,
            })
            .collect();

        Self {
            poll,
            options,
            total_votes,
            has_voted: voted_option.is_some(),
            voted_option,
        }
    }
}

/// One page of polls plus the effective paging parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollPage {
    pub polls: Vec<PollWithOptions>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

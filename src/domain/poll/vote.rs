//! Vote records.

use serde::Serialize;

use crate::domain::foundation::{OptionId, PollId, Timestamp, VoteId, VoterId};

/// A vote about to be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVote {
    pub poll_id: PollId,
    pub option_id: OptionId,
    pub voter: VoterId,
}

/// A recorded vote. At most one exists per (poll, voter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vote {
    pub id: VoteId,
    pub poll_id: PollId,
    pub option_id: OptionId,
    #[serde(skip_serializing)]
    pub voter: VoterId,
    pub voted_at: Timestamp,
}

//! CastVoteHandler - Command handler for voting on a poll.
//!
//! Pre-checks run in a fixed order: existence, active flag, expiry, prior
//! vote, option membership. The storage constraints repeat the last two, so
//! a race between two requests from the same voter still yields exactly one
//! stored vote and a `DuplicateVote` for the loser.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::foundation::{OptionId, PollId, Timestamp, VoterId};
use crate::domain::poll::{contains_option, NewVote, PollError, Vote};
use crate::ports::PollRepository;

/// Command to cast a vote.
#[derive(Debug, Clone)]
pub struct CastVoteCommand {
    pub poll_id: PollId,
    pub option_id: OptionId,
    pub voter: VoterId,
}

/// Handler for casting votes.
pub struct CastVoteHandler {
    repository: Arc<dyn PollRepository>,
}

impl CastVoteHandler {
    pub fn new(repository: Arc<dyn PollRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CastVoteCommand) -> Result<Vote, PollError> {
        let poll_id = cmd.poll_id;

        // 1. Poll must exist
        let poll = self
            .repository
            .find_by_id(&poll_id)
            .await
            .map_err(|e| PollError::from_repository(poll_id, None, e))?
            .ok_or_else(|| PollError::not_found(poll_id))?;

        // 2-3. Active, then not expired
        poll.ensure_accepts_votes(&Timestamp::now())?;

        // 4. One vote per voter
        let prior = self
            .repository
            .has_voted(&poll_id, &cmd.voter)
            .await
            .map_err(|e| PollError::from_repository(poll_id, None, e))?;
        if prior.is_some() {
            return Err(PollError::duplicate_vote(poll_id));
        }

        // 5. Option must belong to this poll
        let options = self
            .repository
            .find_options(&poll_id)
            .await
            .map_err(|e| PollError::from_repository(poll_id, None, e))?;
        if !contains_option(&options, &cmd.option_id) {
            return Err(PollError::invalid_option(cmd.option_id));
        }

        // 6. Insert and count atomically
        let new_vote = NewVote {
            poll_id,
            option_id: cmd.option_id,
            voter: cmd.voter,
        };
        let vote = self.repository.cast_vote(&new_vote).await.map_err(|e| {
            let err = PollError::from_repository(poll_id, Some(new_vote.option_id), e);
            if err.is_client_error() {
                warn!(poll_id = %poll_id, option_id = %new_vote.option_id, error = %err, "Vote rejected by storage");
            } else {
                error!(poll_id = %poll_id, option_id = %new_vote.option_id, error = %err, "Failed to cast vote");
            }
            err
        })?;

        info!(
            poll_id = %vote.poll_id,
            option_id = %vote.option_id,
            vote_id = %vote.id,
            "Vote cast"
        );

        Ok(vote)
    }
}

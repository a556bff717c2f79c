//! GetPollResultsHandler - Query handler for live poll tallies.

use std::sync::Arc;
use tracing::warn;

use crate::domain::foundation::{PollId, VoterId};
use crate::domain::poll::{PollError, PollResults};
use crate::ports::PollRepository;

/// Query for a poll's results as seen by one voter.
#[derive(Debug, Clone)]
pub struct GetPollResultsQuery {
    pub poll_id: PollId,
    pub voter: VoterId,
}

/// Handler for reading poll results.
pub struct GetPollResultsHandler {
    repository: Arc<dyn PollRepository>,
}

impl GetPollResultsHandler {
    pub fn new(repository: Arc<dyn PollRepository>) -> Self {
        Self { repository }
    }

    /// Loads the poll, its options and the caller's own vote.
    ///
    /// A failed vote lookup is logged and reported as "not voted".
    pub async fn handle(&self, query: GetPollResultsQuery) -> Result<PollResults, PollError> {
        let poll = self
            .repository
            .find_by_id(&query.poll_id)
            .await
            .map_err(|e| PollError::from_repository(query.poll_id, None, e))?
            .ok_or_else(|| PollError::not_found(query.poll_id))?;

        let options = self
            .repository
            .find_options(&query.poll_id)
            .await
            .map_err(|e| PollError::from_repository(query.poll_id, None, e))?;

        let voted_option = match self.repository.has_voted(&query.poll_id, &query.voter).await {
            Ok(voted) => voted,
            Err(e) => {
                warn!(poll_id = %query.poll_id, error = %e, "Failed to check vote status");
                None
            }
        };

        Ok(PollResults::tally(poll, options, voted_option))
    }
}

//! In-memory poll repository for testing and development.
//!
//! Keeps every row behind one `RwLock`. A vote insert and both counter
//! increments happen under a single write guard, which gives the same
//! all-or-nothing behavior the PostgreSQL adapter gets from a transaction.
//! Not suitable for multi-process deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{
    DomainError, ErrorCode, OptionId, PollId, Timestamp, VoteId, VoterId,
};
use crate::domain::poll::{NewVote, Poll, PollDraft, PollOption, PollWithOptions, Vote};
use crate::ports::{HealthCheck, ListOptions, PollRepository, PoolStats};

/// In-memory repository. Clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPollRepository {
    store: Arc<RwLock<Store>>,
}

#[derive(Debug, Default)]
struct Store {
    polls: HashMap<PollId, Poll>,
    /// Poll ids in creation order.
    created: Vec<PollId>,
    /// Options per poll, kept sorted by position.
    options: HashMap<PollId, Vec<PollOption>>,
    /// Unique on (poll, voter).
    votes: HashMap<(PollId, VoterId), Vote>,
}

impl Store {
    /// Polls matching the filter, newest first.
    fn matching(&self, active_only: bool, now: &Timestamp) -> Vec<&Poll> {
        self.created
            .iter()
            .rev()
            .filter_map(|id| self.polls.get(id))
            .filter(|poll| !active_only || poll.is_open_at(now))
            .collect()
    }

    fn page(&self, options: &ListOptions) -> Vec<Poll> {
        self.matching(options.active_only, &Timestamp::now())
            .into_iter()
            .skip(options.offset as usize)
            .take(options.limit as usize)
            .cloned()
            .collect()
    }

    fn options_of(&self, poll_id: &PollId) -> Vec<PollOption> {
        self.options.get(poll_id).cloned().unwrap_or_default()
    }
}

impl InMemoryPollRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an already-built poll as-is, bypassing creation rules.
    ///
    /// Lets tests set up states the service never produces on its own,
    /// such as polls that expired in the past.
    pub async fn seed(&self, poll: Poll, options: Vec<PollOption>) {
        let mut store = self.store.write().await;
        store.created.push(*poll.id());
        store.options.insert(*poll.id(), options);
        store.polls.insert(*poll.id(), poll);
    }

    /// Number of stored vote rows.
    pub async fn vote_count(&self) -> usize {
        self.store.read().await.votes.len()
    }
}

#[async_trait]
impl PollRepository for InMemoryPollRepository {
    async fn create_poll_with_options(
        &self,
        draft: &PollDraft,
    ) -> Result<PollWithOptions, DomainError> {
        let now = Timestamp::now();
        let poll = Poll::reconstitute(
            PollId::new(),
            draft.question().to_string(),
            draft.description().map(str::to_string),
            now,
            draft.expires_at().copied(),
            true,
            0,
        );
        let options: Vec<PollOption> = draft
            .positioned_options()
            .map(|(position, text)| {
                PollOption::reconstitute(
                    OptionId::new(),
                    *poll.id(),
                    text.to_string(),
                    0,
                    position,
                    now,
                )
            })
            .collect();

        let mut store = self.store.write().await;
        store.polls.insert(*poll.id(), poll.clone());
        store.created.push(*poll.id());
        store.options.insert(*poll.id(), options.clone());

        Ok(PollWithOptions { poll, options })
    }

    async fn find_by_id(&self, id: &PollId) -> Result<Option<Poll>, DomainError> {
        Ok(self.store.read().await.polls.get(id).cloned())
    }

    async fn find_options(&self, poll_id: &PollId) -> Result<Vec<PollOption>, DomainError> {
        Ok(self.store.read().await.options_of(poll_id))
    }

    async fn list_polls(&self, options: &ListOptions) -> Result<Vec<Poll>, DomainError> {
        Ok(self.store.read().await.page(options))
    }

    async fn list_polls_with_options(
        &self,
        options: &ListOptions,
    ) -> Result<Vec<PollWithOptions>, DomainError> {
        let store = self.store.read().await;
        Ok(store
            .page(options)
            .into_iter()
            .map(|poll| {
                let options = store.options_of(poll.id());
                PollWithOptions { poll, options }
            })
            .collect())
    }

    async fn count_polls(&self, active_only: bool) -> Result<u64, DomainError> {
        let store = self.store.read().await;
        Ok(store.matching(active_only, &Timestamp::now()).len() as u64)
    }

    async fn cast_vote(&self, vote: &NewVote) -> Result<Vote, DomainError> {
        let mut guard = self.store.write().await;
        let Store {
            polls,
            options,
            votes,
            ..
        } = &mut *guard;

        let key = (vote.poll_id, vote.voter.clone());
        if votes.contains_key(&key) {
            return Err(DomainError::new(
                ErrorCode::DuplicateVote,
                format!("Voter already voted on poll {}", vote.poll_id),
            ));
        }

        let poll = polls.get_mut(&vote.poll_id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::PollNotFound,
                format!("Poll not found: {}", vote.poll_id),
            )
        })?;

        let option = options
            .get_mut(&vote.poll_id)
            .and_then(|opts| opts.iter_mut().find(|o| o.id() == &vote.option_id))
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::InvalidOption,
                    format!("Option {} does not belong to poll {}", vote.option_id, vote.poll_id),
                )
            })?;

        // All checks passed; the three writes below cannot fail.
        option.record_vote();
        poll.record_vote();

        let record = Vote {
            id: VoteId::new(),
            poll_id: vote.poll_id,
            option_id: vote.option_id,
            voter: vote.voter.clone(),
            voted_at: Timestamp::now(),
        };
        votes.insert(key, record.clone());

        Ok(record)
    }

    async fn has_voted(
        &self,
        poll_id: &PollId,
        voter: &VoterId,
    ) -> Result<Option<OptionId>, DomainError> {
        let store = self.store.read().await;
        Ok(store
            .votes
            .get(&(*poll_id, voter.clone()))
            .map(|vote| vote.option_id))
    }

    async fn deactivate(&self, id: &PollId) -> Result<(), DomainError> {
        let mut store = self.store.write().await;
        match store.polls.get_mut(id) {
            Some(poll) => {
                poll.deactivate();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::PollNotFound,
                format!("Poll not found: {}", id),
            )),
        }
    }
}

#[async_trait]
impl HealthCheck for InMemoryPollRepository {
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }

    fn pool_stats(&self) -> Option<PoolStats> {
        None
    }
}

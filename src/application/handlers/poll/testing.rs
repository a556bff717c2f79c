//! Test doubles shared by the poll handler tests.

use async_trait::async_trait;

use crate::adapters::memory::InMemoryPollRepository;
use crate::domain::foundation::{
    DomainError, ErrorCode, OptionId, PollId, Timestamp, VoterId,
};
use crate::domain::poll::{NewVote, Poll, PollDraft, PollOption, PollWithOptions, Vote};
use crate::ports::{ListOptions, PollRepository};

/// Which repository calls should fail.
#[derive(Debug, Default, Clone)]
pub(crate) struct Failures {
    pub create: bool,
    pub find: bool,
    pub options: bool,
    pub list: bool,
    pub count: bool,
    pub has_voted: bool,
    /// Code returned by `cast_vote` instead of storing the vote.
    pub cast: Option<ErrorCode>,
    pub deactivate: bool,
}

/// In-memory repository that fails the selected calls.
pub(crate) struct FlakyPollRepository {
    pub inner: InMemoryPollRepository,
    pub failures: Failures,
}

impl FlakyPollRepository {
    pub fn new(inner: InMemoryPollRepository, failures: Failures) -> Self {
        Self { inner, failures }
    }
}

fn simulated(operation: &str) -> DomainError {
    DomainError::database(operation, "simulated failure")
}

#[async_trait]
impl PollRepository for FlakyPollRepository {
    async fn create_poll_with_options(
        &self,
        draft: &PollDraft,
    ) -> Result<PollWithOptions, DomainError> {
        if self.failures.create {
            return Err(simulated("insert poll"));
        }
        self.inner.create_poll_with_options(draft).await
    }

    async fn find_by_id(&self, id: &PollId) -> Result<Option<Poll>, DomainError> {
        if self.failures.find {
            return Err(simulated("fetch poll"));
        }
        self.inner.find_by_id(id).await
    }

    async fn find_options(&self, poll_id: &PollId) -> Result<Vec<PollOption>, DomainError> {
        if self.failures.options {
            return Err(simulated("fetch options"));
        }
        self.inner.find_options(poll_id).await
    }

    async fn list_polls(&self, options: &ListOptions) -> Result<Vec<Poll>, DomainError> {
        if self.failures.list {
            return Err(simulated("list polls"));
        }
        self.inner.list_polls(options).await
    }

    async fn list_polls_with_options(
        &self,
        options: &ListOptions,
    ) -> Result<Vec<PollWithOptions>, DomainError> {
        if self.failures.list {
            return Err(simulated("list polls"));
        }
        self.inner.list_polls_with_options(options).await
    }

    async fn count_polls(&self, active_only: bool) -> Result<u64, DomainError> {
        if self.failures.count {
            return Err(simulated("count polls"));
        }
        self.inner.count_polls(active_only).await
    }

    async fn cast_vote(&self, vote: &NewVote) -> Result<Vote, DomainError> {
        if let Some(code) = self.failures.cast {
            return Err(DomainError::new(code, "simulated cast failure"));
        }
        self.inner.cast_vote(vote).await
    }

    async fn has_voted(
        &self,
        poll_id: &PollId,
        voter: &VoterId,
    ) -> Result<Option<OptionId>, DomainError> {
        if self.failures.has_voted {
            return Err(simulated("check vote"));
        }
        self.inner.has_voted(poll_id, voter).await
    }

    async fn deactivate(&self, id: &PollId) -> Result<(), DomainError> {
        if self.failures.deactivate {
            return Err(simulated("deactivate poll"));
        }
        self.inner.deactivate(id).await
    }
}

pub(crate) fn voter(id: &str) -> VoterId {
    VoterId::new(id).unwrap()
}

/// Creates an open poll with the given option texts.
pub(crate) async fn create_poll(
    repo: &InMemoryPollRepository,
    question: &str,
    options: &[&str],
) -> PollWithOptions {
    let draft = PollDraft::new(
        question.to_string(),
        None,
        options.iter().map(|o| o.to_string()).collect(),
        None,
        Timestamp::now(),
    )
    .unwrap();
    repo.create_poll_with_options(&draft).await.unwrap()
}

/// Seeds a poll whose expiry is already in the past.
pub(crate) async fn seed_expired_poll(repo: &InMemoryPollRepository) -> PollWithOptions {
    let created_at = Timestamp::now().minus_days(2);
    let poll = Poll::reconstitute(
        PollId::new(),
        "Lunch tomorrow?".to_string(),
        None,
        created_at,
        Some(Timestamp::now().minus_days(1)),
        true,
        0,
    );
    let options: Vec<PollOption> = ["Pizza", "Salad"]
        .iter()
        .enumerate()
        .map(|(position, text)| {
            PollOption::reconstitute(
                OptionId::new(),
                *poll.id(),
                text.to_string(),
                0,
                position as u32,
                created_at,
            )
        })
        .collect();
    repo.seed(poll.clone(), options.clone()).await;
    PollWithOptions { poll, options }
}

//! ListPollsHandler - Query handler for paginated poll listings.

use std::sync::Arc;
use tracing::warn;

use crate::domain::poll::{PollError, PollPage};
use crate::ports::{ListOptions, PollRepository};

/// Query for one page of polls. Raw values are clamped by the handler.
#[derive(Debug, Clone, Default)]
pub struct ListPollsQuery {
    pub limit: i64,
    pub offset: i64,
    pub active_only: bool,
}

/// Handler for listing polls.
pub struct ListPollsHandler {
    repository: Arc<dyn PollRepository>,
}

impl ListPollsHandler {
    pub fn new(repository: Arc<dyn PollRepository>) -> Self {
        Self { repository }
    }

    /// Returns polls newest first, each with its options.
    ///
    /// A failed count is logged and reported as zero.
    pub async fn handle(&self, query: ListPollsQuery) -> Result<PollPage, PollError> {
        let options = ListOptions::clamped(query.limit, query.offset, query.active_only);

        let polls = self.repository.list_polls_with_options(&options).await?;

        let total = match self.repository.count_polls(options.active_only).await {
            Ok(total) => total,
            Err(e) => {
                warn!(error = %e, "Failed to count polls");
                0
            }
        };

        Ok(PollPage {
            polls,
            total,
            limit: options.limit,
            offset: options.offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPollRepository;
    use crate::application::handlers::poll::testing::{
        create_poll, seed_expired_poll, Failures, FlakyPollRepository,
    };

    #[tokio::test]
    async fn lists_newest_first_with_options() {
        let repo = InMemoryPollRepository::new();
        create_poll(&repo, "Older poll", &["A", "B"]).await;
        create_poll(&repo, "Newer poll", &["C", "D", "E"]).await;

        let page = ListPollsHandler::new(Arc::new(repo))
            .handle(ListPollsQuery::default())
            .await
            .unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.limit, 20);
        assert_eq!(page.offset, 0);
        assert_eq!(page.polls[0].poll.question(), "Newer poll");
        assert_eq!(page.polls[0].options.len(), 3);
        assert_eq!(page.polls[1].poll.question(), "Older poll");
    }

    #[tokio::test]
    async fn oversized_limit_is_capped() {
        let page = ListPollsHandler::new(Arc::new(InMemoryPollRepository::new()))
            .handle(ListPollsQuery {
                limit: 500,
                offset: -4,
                active_only: false,
            })
            .await
            .unwrap();

        assert_eq!(page.limit, 100);
        assert_eq!(page.offset, 0);
    }

    #[tokio::test]
    async fn active_filter_skips_inactive_and_expired() {
        let repo = InMemoryPollRepository::new();
        let open = create_poll(&repo, "Open poll", &["A", "B"]).await;
        let closed = create_poll(&repo, "Closed poll", &["A", "B"]).await;
        repo.deactivate(closed.poll.id()).await.unwrap();
        seed_expired_poll(&repo).await;

        let handler = ListPollsHandler::new(Arc::new(repo));
        let active = handler
            .handle(ListPollsQuery {
                active_only: true,
                ..Default::default()
            })
            .await
            .unwrap();
        let all = handler.handle(ListPollsQuery::default()).await.unwrap();

        assert_eq!(active.total, 1);
        assert_eq!(active.polls.len(), 1);
        assert_eq!(active.polls[0].poll.id(), open.poll.id());
        assert_eq!(all.total, 3);
    }

    #[tokio::test]
    async fn failed_count_degrades_to_zero() {
        let inner = InMemoryPollRepository::new();
        create_poll(&inner, "Only poll", &["A", "B"]).await;
        let repo = FlakyPollRepository::new(
            inner,
            Failures {
                count: true,
                ..Default::default()
            },
        );

        let page = ListPollsHandler::new(Arc::new(repo))
            .handle(ListPollsQuery::default())
            .await
            .unwrap();

        assert_eq!(page.polls.len(), 1);
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn failed_listing_is_storage_error() {
        let repo = FlakyPollRepository::new(
            InMemoryPollRepository::new(),
            Failures {
                list: true,
                ..Default::default()
            },
        );

        let err = ListPollsHandler::new(Arc::new(repo))
            .handle(ListPollsQuery::default())
            .await
            .unwrap_err();

        assert!(matches!(err, PollError::Storage(_)));
    }
}

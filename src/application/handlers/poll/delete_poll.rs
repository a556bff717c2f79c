//! DeletePollHandler - Command handler for soft-deleting polls.

use std::sync::Arc;
use tracing::{error, info};

use crate::domain::foundation::PollId;
use crate::domain::poll::PollError;
use crate::ports::PollRepository;

/// Command to deactivate a poll.
#[derive(Debug, Clone)]
pub struct DeletePollCommand {
    pub poll_id: PollId,
}

/// Handler for deleting polls. Rows are kept; the poll stops accepting votes.
pub struct DeletePollHandler {
    repository: Arc<dyn PollRepository>,
}

impl DeletePollHandler {
    pub fn new(repository: Arc<dyn PollRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeletePollCommand) -> Result<(), PollError> {
        self.repository
            .deactivate(&cmd.poll_id)
            .await
            .map_err(|e| {
                let err = PollError::from_repository(cmd.poll_id, None, e);
                if !err.is_client_error() {
                    error!(poll_id = %cmd.poll_id, error = %err, "Failed to delete poll");
                }
                err
            })?;

        info!(poll_id = %cmd.poll_id, "Poll deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPollRepository;
    use crate::application::handlers::poll::testing::{
        create_poll, Failures, FlakyPollRepository,
    };

    #[tokio::test]
    async fn deactivates_but_keeps_poll() {
        let repo = InMemoryPollRepository::new();
        let created = create_poll(&repo, "Best color?", &["Red", "Blue"]).await;
        let poll_id = *created.poll.id();

        DeletePollHandler::new(Arc::new(repo.clone()))
            .handle(DeletePollCommand { poll_id })
            .await
            .unwrap();

        let poll = repo.find_by_id(&poll_id).await.unwrap().unwrap();
        assert!(!poll.is_active());
    }

    #[tokio::test]
    async fn deleting_twice_is_idempotent() {
        let repo = InMemoryPollRepository::new();
        let created = create_poll(&repo, "Best color?", &["Red", "Blue"]).await;
        let handler = DeletePollHandler::new(Arc::new(repo));
        let cmd = DeletePollCommand {
            poll_id: *created.poll.id(),
        };

        handler.handle(cmd.clone()).await.unwrap();
        assert!(handler.handle(cmd).await.is_ok());
    }

    #[tokio::test]
    async fn unknown_poll_is_not_found() {
        let poll_id = PollId::new();
        let err = DeletePollHandler::new(Arc::new(InMemoryPollRepository::new()))
            .handle(DeletePollCommand { poll_id })
            .await
            .unwrap_err();

        assert_eq!(err, PollError::NotFound(poll_id));
    }

    #[tokio::test]
    async fn storage_failure_is_storage_error() {
        let repo = FlakyPollRepository::new(
            InMemoryPollRepository::new(),
            Failures {
                deactivate: true,
                ..Default::default()
            },
        );

        let err = DeletePollHandler::new(Arc::new(repo))
            .handle(DeletePollCommand {
                poll_id: PollId::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PollError::Storage(_)));
    }
}

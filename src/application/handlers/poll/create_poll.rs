//! CreatePollHandler - Command handler for creating polls.

use std::sync::Arc;
use tracing::{error, info};

use crate::domain::foundation::Timestamp;
use crate::domain::poll::{PollDraft, PollError, PollWithOptions};
use crate::ports::PollRepository;

/// Command to create a new poll.
#[derive(Debug, Clone)]
pub struct CreatePollCommand {
    pub question: String,
    pub description: Option<String>,
    pub options: Vec<String>,
    pub expires_at: Option<Timestamp>,
}

/// Handler for creating polls.
pub struct CreatePollHandler {
    repository: Arc<dyn PollRepository>,
}

impl CreatePollHandler {
    pub fn new(repository: Arc<dyn PollRepository>) -> Self {
        Self { repository }
    }

    /// Validates the command, then stores the poll and its options atomically.
    ///
    /// Nothing reaches storage when validation fails.
    pub async fn handle(&self, cmd: CreatePollCommand) -> Result<PollWithOptions, PollError> {
        let draft = PollDraft::new(
            cmd.question,
            cmd.description,
            cmd.options,
            cmd.expires_at,
            Timestamp::now(),
        )?;

        let created = self
            .repository
            .create_poll_with_options(&draft)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to create poll");
                PollError::from(e)
            })?;

        info!(
            poll_id = %created.poll.id(),
            question = created.poll.question(),
            options_count = created.options.len(),
            "Poll created"
        );

        Ok(created)
    }
}

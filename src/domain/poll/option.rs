//! Poll option entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OptionId, PollId, Timestamp};

/// One selectable choice of a poll.
///
/// Immutable after creation apart from `vote_count`, which storage keeps
/// equal to the number of votes naming this option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    id: OptionId,
    poll_id: PollId,
    #[serde(rename = "option_text")]
    text: String,
    vote_count: u64,
    position: u32,
    created_at: Timestamp,
}

impl PollOption {
    /// Reconstitute an option from persistence (no validation).
    pub fn reconstitute(
        id: OptionId,
        poll_id: PollId,
        text: String,
        vote_count: u64,
        position: u32,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            poll_id,
            text,
            vote_count,
            position,
            created_at,
        }
    }

    pub fn id(&self) -> &OptionId {
        &self.id
    }

    pub fn poll_id(&self) -> &PollId {
        &self.poll_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn vote_count(&self) -> u64 {
        self.vote_count
    }

    /// Zero-based position, unique within the poll.
    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub(crate) fn record_vote(&mut self) {
        self.vote_count += 1;
    }
}

/// Whether `option_id` is among `options`.
pub fn contains_option(options: &[PollOption], option_id: &OptionId) -> bool {
    options.iter().any(|option| option.id() == option_id)
}

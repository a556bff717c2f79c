//! Poll aggregate entity and the validated draft it is created from.
//!
//! A poll is a question with a fixed, ordered set of options. It accepts
//! votes until it is soft-deleted or its expiry passes.

use serde::{Deserialize, Serialize};

use super::PollError;
use crate::domain::foundation::{PollId, Timestamp, ValidationError};

/// Minimum length for a poll question, in characters.
pub const MIN_QUESTION_LENGTH: usize = 5;
/// Maximum length for a poll question, in characters.
pub const MAX_QUESTION_LENGTH: usize = 500;
/// Minimum number of options per poll.
pub const MIN_OPTIONS: usize = 2;
/// Maximum number of options per poll.
pub const MAX_OPTIONS: usize = 10;
/// Minimum length for an option text, in characters.
pub const MIN_OPTION_LENGTH: usize = 1;
/// Maximum length for an option text, in characters.
pub const MAX_OPTION_LENGTH: usize = 200;

/// Poll aggregate.
///
/// # Invariants
///
/// - `id` and `created_at` never change
/// - `is_active` only moves from `true` to `false`
/// - `total_votes` equals the number of recorded votes; only storage moves it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    id: PollId,
    question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<Timestamp>,
    is_active: bool,
    total_votes: u64,
}

impl Poll {
    /// Reconstitute a poll from persistence (no validation).
    pub fn reconstitute(
        id: PollId,
        question: String,
        description: Option<String>,
        created_at: Timestamp,
        expires_at: Option<Timestamp>,
        is_active: bool,
        total_votes: u64,
    ) -> Self {
        Self {
            id,
            question,
            description,
            created_at,
            expires_at,
            is_active,
            total_votes,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &PollId {
        &self.id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn expires_at(&self) -> Option<&Timestamp> {
        self.expires_at.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn total_votes(&self) -> u64 {
        self.total_votes
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// True once the expiry, if any, is at or before `now`.
    pub fn is_expired_at(&self, now: &Timestamp) -> bool {
        self.expires_at
            .map(|expires_at| !expires_at.is_after(now))
            .unwrap_or(false)
    }

    /// Active and not expired.
    pub fn is_open_at(&self, now: &Timestamp) -> bool {
        self.is_active && !self.is_expired_at(now)
    }

    /// Checks the lifecycle rules that gate voting.
    ///
    /// # Errors
    ///
    /// - `Inactive` if the poll was soft-deleted
    /// - `Expired` if the expiry has passed
    pub fn ensure_accepts_votes(&self, now: &Timestamp) -> Result<(), PollError> {
        if !self.is_active {
            return Err(PollError::inactive(self.id));
        }
        if self.is_expired_at(now) {
            return Err(PollError::expired(self.id));
        }
        Ok(())
    }

    /// Soft delete. Idempotent; there is no way back.
    pub(crate) fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Counter bump paired with a vote insert by a storage adapter.
    pub(crate) fn record_vote(&mut self) {
        self.total_votes += 1;
    }
}

/// Validated input for creating a poll.
///
/// Construction enforces every creation rule, so a `PollDraft` can be handed
/// to storage without further checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollDraft {
    question: String,
    description: Option<String>,
    options: Vec<String>,
    expires_at: Option<Timestamp>,
}

impl PollDraft {
    /// Validates creation input against `now`.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` on `question` if not 5-500 characters
    /// - `OutOfRange` on `options` if fewer than 2 or more than 10
    /// - `OutOfRange` on `options[i]` if an option is not 1-200 characters
    /// - `NotInFuture` on `expires_at` if it is not strictly after `now`
    pub fn new(
        question: String,
        description: Option<String>,
        options: Vec<String>,
        expires_at: Option<Timestamp>,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        check_length("question", &question, MIN_QUESTION_LENGTH, MAX_QUESTION_LENGTH)?;

        if options.len() < MIN_OPTIONS || options.len() > MAX_OPTIONS {
            return Err(ValidationError::out_of_range(
                "options",
                MIN_OPTIONS as i64,
                MAX_OPTIONS as i64,
                options.len() as i64,
            ));
        }

        for (index, option) in options.iter().enumerate() {
            check_length(
                &format!("options[{}]", index),
                option,
                MIN_OPTION_LENGTH,
                MAX_OPTION_LENGTH,
            )?;
        }

        if let Some(expires_at) = expires_at {
            if !expires_at.is_after(&now) {
                return Err(ValidationError::not_in_future("expires_at"));
            }
        }

        Ok(Self {
            question,
            description,
            options,
            expires_at,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn expires_at(&self) -> Option<&Timestamp> {
        self.expires_at.as_ref()
    }

    /// Option texts in input order.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Option texts paired with their zero-based position.
    pub fn positioned_options(&self) -> impl Iterator<Item = (u32, &str)> + '_ {
        self.options
            .iter()
            .enumerate()
            .map(|(position, text)| (position as u32, text.as_str()))
    }
}

fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ValidationError::out_of_range(
            field,
            min as i64,
            max as i64,
            len as i64,
        ));
    }
    Ok(())
}

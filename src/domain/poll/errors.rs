//! Poll-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, OptionId, PollId, ValidationError};

/// Errors surfaced by poll operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    /// Input failed a shape or range rule.
    Validation(ValidationError),
    /// Poll was not found.
    NotFound(PollId),
    /// Poll was soft-deleted and no longer accepts votes.
    Inactive(PollId),
    /// Poll expiry has passed.
    Expired(PollId),
    /// Voter already has a vote on this poll.
    DuplicateVote(PollId),
    /// Option does not belong to the poll.
    InvalidOption(OptionId),
    /// Anything else originating from the data layer.
    Storage(String),
}

impl PollError {
    pub fn not_found(id: PollId) -> Self {
        PollError::NotFound(id)
    }
    pub fn inactive(id: PollId) -> Self {
        PollError::Inactive(id)
    }
    pub fn expired(id: PollId) -> Self {
        PollError::Expired(id)
    }
    pub fn duplicate_vote(id: PollId) -> Self {
        PollError::DuplicateVote(id)
    }
    pub fn invalid_option(id: OptionId) -> Self {
        PollError::InvalidOption(id)
    }
    pub fn storage(message: impl Into<String>) -> Self {
        PollError::Storage(message.into())
    }

    /// Translates a repository error raised while working on `poll_id`.
    ///
    /// Storage-level constraint violations map onto the same variants the
    /// service pre-checks produce.
    pub fn from_repository(poll_id: PollId, option_id: Option<OptionId>, err: DomainError) -> Self {
        match (err.code, option_id) {
            (ErrorCode::PollNotFound, _) => PollError::NotFound(poll_id),
            (ErrorCode::DuplicateVote, _) => PollError::DuplicateVote(poll_id),
            (ErrorCode::PollInactive, _) => PollError::Inactive(poll_id),
            (ErrorCode::PollExpired, _) => PollError::Expired(poll_id),
            (ErrorCode::InvalidOption, Some(option_id)) => PollError::InvalidOption(option_id),
            _ => err.into(),
        }
    }

    /// True for failures caused by the caller rather than the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, PollError::Storage(_))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PollError::Validation(_) => ErrorCode::ValidationFailed,
            PollError::NotFound(_) => ErrorCode::PollNotFound,
            PollError::Inactive(_) => ErrorCode::PollInactive,
            PollError::Expired(_) => ErrorCode::PollExpired,
            PollError::DuplicateVote(_) => ErrorCode::DuplicateVote,
            PollError::InvalidOption(_) => ErrorCode::InvalidOption,
            PollError::Storage(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            PollError::Validation(err) => err.to_string(),
            PollError::NotFound(id) => format!("Poll not found: {}", id),
            PollError::Inactive(_) => "Poll is not active".to_string(),
            PollError::Expired(_) => "Poll has expired".to_string(),
            PollError::DuplicateVote(_) => "You have already voted on this poll".to_string(),
            PollError::InvalidOption(_) => "Invalid option for this poll".to_string(),
            PollError::Storage(msg) => format!("Storage error: {}", msg),
        }
    }
}

impl std::fmt::Display for PollError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PollError {}

impl From<ValidationError> for PollError {
    fn from(err: ValidationError) -> Self {
        PollError::Validation(err)
    }
}

impl From<DomainError> for PollError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => PollError::Validation(ValidationError::invalid_format(
                err.details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                err.message,
            )),
            _ => PollError::Storage(err.message),
        }
    }
}

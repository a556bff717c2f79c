//! Poll repository port.
//!
//! Defines the storage primitives the poll service composes. No business
//! validation lives behind this trait: implementations own transactions and
//! consistency, nothing else.
//!
//! # Consistency contract
//!
//! - `create_poll_with_options` is all-or-nothing
//! - `cast_vote` inserts the vote and bumps both counters atomically;
//!   counters are only ever moved by relative increments
//! - At most one vote exists per (poll, voter); a second insert fails with
//!   `ErrorCode::DuplicateVote`, never with a generic database error

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, OptionId, PollId, VoterId};
use crate::domain::poll::{NewVote, Poll, PollDraft, PollOption, PollWithOptions, Vote};

/// Repository port for polls, options and votes.
#[async_trait]
pub trait PollRepository: Send + Sync {
    /// Insert a poll and its options in one transaction.
    ///
    /// Options receive positions `0..N-1` in draft order and zero counters.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure (nothing is written)
    async fn create_poll_with_options(
        &self,
        draft: &PollDraft,
    ) -> Result<PollWithOptions, DomainError>;

    /// Find a poll by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &PollId) -> Result<Option<Poll>, DomainError>;

    /// Options of a poll ordered by position.
    async fn find_options(&self, poll_id: &PollId) -> Result<Vec<PollOption>, DomainError>;

    /// One page of polls, newest first.
    async fn list_polls(&self, options: &ListOptions) -> Result<Vec<Poll>, DomainError>;

    /// One page of polls with their options, newest first.
    async fn list_polls_with_options(
        &self,
        options: &ListOptions,
    ) -> Result<Vec<PollWithOptions>, DomainError>;

    /// Number of polls matching the filter, ignoring paging.
    async fn count_polls(&self, active_only: bool) -> Result<u64, DomainError>;

    /// Record a vote and increment the option and poll counters atomically.
    ///
    /// # Errors
    ///
    /// - `DuplicateVote` if the voter already voted on the poll
    /// - `InvalidOption` if the option does not belong to the poll
    /// - `DatabaseError` on persistence failure (nothing is written)
    async fn cast_vote(&self, vote: &NewVote) -> Result<Vote, DomainError>;

    /// The option this voter picked on the poll, if any.
    async fn has_voted(
        &self,
        poll_id: &PollId,
        voter: &VoterId,
    ) -> Result<Option<OptionId>, DomainError>;

    /// Soft delete: flip the active flag off.
    ///
    /// # Errors
    ///
    /// - `PollNotFound` if no row matched
    async fn deactivate(&self, id: &PollId) -> Result<(), DomainError>;
}

/// Default page size when the caller gives none (or a non-positive one).
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Paging and filtering for poll listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    /// Maximum number of results to return.
    pub limit: u32,

    /// Number of results to skip.
    pub offset: u32,

    /// Only polls that are active and not expired.
    pub active_only: bool,
}

impl ListOptions {
    /// Builds options from raw caller input.
    ///
    /// Non-positive limits fall back to the default, oversized ones are
    /// capped, negative offsets become zero.
    pub fn clamped(limit: i64, offset: i64, active_only: bool) -> Self {
        let limit = if limit <= 0 {
            DEFAULT_PAGE_SIZE
        } else {
            limit.min(MAX_PAGE_SIZE as i64) as u32
        };
        let offset = offset.clamp(0, u32::MAX as i64) as u32;

        Self {
            limit,
            offset,
            active_only,
        }
    }
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
            active_only: false,
        }
    }
}

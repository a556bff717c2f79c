//! HTTP DTOs for poll endpoints.
//!
//! Responses reuse the domain read models, which already serialize to the
//! public JSON shape; only requests need their own types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::application::handlers::poll::{CreatePollCommand, ListPollsQuery};
use crate::domain::foundation::Timestamp;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a poll.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePollRequest {
    pub question: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<CreatePollRequest> for CreatePollCommand {
    fn from(req: CreatePollRequest) -> Self {
        Self {
            question: req.question,
            description: req.description.filter(|d| !d.trim().is_empty()),
            options: req.options,
            expires_at: req.expires_at.map(Timestamp::from_datetime),
        }
    }
}

/// Request to vote on a poll. The id stays a string so a malformed value
/// gets the same 400 envelope as every other input error.
#[derive(Debug, Clone, Deserialize)]
pub struct VoteRequest {
    pub option_id: String,
}

/// Query parameters for listing polls.
///
/// Values that fail to parse are treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPollsParams {
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub offset: Option<String>,
    #[serde(default)]
    pub active: Option<String>,
}

impl From<ListPollsParams> for ListPollsQuery {
    fn from(params: ListPollsParams) -> Self {
        let number = |raw: Option<String>| {
            raw.and_then(|v| v.trim().parse::<i64>().ok())
                .unwrap_or(0)
        };
        Self {
            limit: number(params.limit),
            offset: number(params.offset),
            active_only: params.active.as_deref() == Some("true"),
        }
    }
}

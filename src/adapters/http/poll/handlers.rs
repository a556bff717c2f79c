//! HTTP handlers for poll endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use tracing::warn;

use crate::adapters::http::response::{bad_request, respond, ApiResponse};
use crate::adapters::http::voter::VoterIdentity;
use crate::application::handlers::poll::{
    CastVoteCommand, CastVoteHandler, CreatePollHandler, DeletePollCommand, DeletePollHandler,
    GetPollResultsHandler, GetPollResultsQuery, ListPollsHandler,
};
use crate::domain::foundation::{OptionId, PollId};
use crate::domain::poll::PollError;
use crate::ports::PollRepository;

use super::dto::{CreatePollRequest, ListPollsParams, VoteRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PollHandlers {
    create_handler: Arc<CreatePollHandler>,
    results_handler: Arc<GetPollResultsHandler>,
    vote_handler: Arc<CastVoteHandler>,
    list_handler: Arc<ListPollsHandler>,
    delete_handler: Arc<DeletePollHandler>,
}

impl PollHandlers {
    pub fn new(
        create_handler: Arc<CreatePollHandler>,
        results_handler: Arc<GetPollResultsHandler>,
        vote_handler: Arc<CastVoteHandler>,
        list_handler: Arc<ListPollsHandler>,
        delete_handler: Arc<DeletePollHandler>,
    ) -> Self {
        Self {
            create_handler,
            results_handler,
            vote_handler,
            list_handler,
            delete_handler,
        }
    }

    /// Builds every handler over one repository.
    pub fn from_repository(repository: Arc<dyn PollRepository>) -> Self {
        Self::new(
            Arc::new(CreatePollHandler::new(repository.clone())),
            Arc::new(GetPollResultsHandler::new(repository.clone())),
            Arc::new(CastVoteHandler::new(repository.clone())),
            Arc::new(ListPollsHandler::new(repository.clone())),
            Arc::new(DeletePollHandler::new(repository)),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/v1/polls - Create a poll
pub async fn create_poll(
    State(handlers): State<PollHandlers>,
    payload: Result<Json<CreatePollRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return invalid_body(rejection),
    };

    match handlers.create_handler.handle(req.into()).await {
        Ok(created) => respond(
            StatusCode::CREATED,
            ApiResponse::data(created).with_message("Poll created successfully"),
        ),
        Err(e) => handle_poll_error(e),
    }
}

/// GET /api/v1/polls - List polls
pub async fn list_polls(
    State(handlers): State<PollHandlers>,
    Query(params): Query<ListPollsParams>,
) -> Response {
    match handlers.list_handler.handle(params.into()).await {
        Ok(page) => respond(StatusCode::OK, ApiResponse::data(page)),
        Err(e) => handle_poll_error(e),
    }
}

/// GET /api/v1/polls/:id - Poll with live results
pub async fn get_poll(
    State(handlers): State<PollHandlers>,
    Path(poll_id): Path<String>,
    VoterIdentity(voter): VoterIdentity,
) -> Response {
    let poll_id = match poll_id.parse::<PollId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid poll ID"),
    };

    match handlers
        .results_handler
        .handle(GetPollResultsQuery { poll_id, voter })
        .await
    {
        Ok(results) => respond(StatusCode::OK, ApiResponse::data(results)),
        Err(e) => handle_poll_error(e),
    }
}

/// POST /api/v1/polls/:id/vote - Cast a vote, answer with fresh results
pub async fn vote_on_poll(
    State(handlers): State<PollHandlers>,
    Path(poll_id): Path<String>,
    VoterIdentity(voter): VoterIdentity,
    payload: Result<Json<VoteRequest>, JsonRejection>,
) -> Response {
    let poll_id = match poll_id.parse::<PollId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid poll ID"),
    };
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return invalid_body(rejection),
    };
    let option_id = match req.option_id.parse::<OptionId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid option ID"),
    };

    let cmd = CastVoteCommand {
        poll_id,
        option_id,
        voter: voter.clone(),
    };
    if let Err(e) = handlers.vote_handler.handle(cmd).await {
        return handle_poll_error(e);
    }

    match handlers
        .results_handler
        .handle(GetPollResultsQuery { poll_id, voter })
        .await
    {
        Ok(results) => respond(
            StatusCode::OK,
            ApiResponse::data(results).with_message("Vote cast successfully"),
        ),
        Err(e) => {
            warn!(poll_id = %poll_id, error = %e, "Failed to load results after vote");
            respond(StatusCode::OK, ApiResponse::message("Vote cast successfully"))
        }
    }
}

/// DELETE /api/v1/polls/:id - Soft delete a poll
pub async fn delete_poll(
    State(handlers): State<PollHandlers>,
    Path(poll_id): Path<String>,
) -> Response {
    let poll_id = match poll_id.parse::<PollId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid poll ID"),
    };

    match handlers
        .delete_handler
        .handle(DeletePollCommand { poll_id })
        .await
    {
        Ok(()) => respond(
            StatusCode::OK,
            ApiResponse::message("Poll deleted successfully"),
        ),
        Err(e) => handle_poll_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn invalid_body(rejection: JsonRejection) -> Response {
    warn!(error = %rejection, "Rejected request body");
    bad_request("Invalid request body")
}

/// HTTP status for each poll error.
pub fn status_for(error: &PollError) -> StatusCode {
    match error {
        PollError::Validation(_) | PollError::InvalidOption(_) => StatusCode::BAD_REQUEST,
        PollError::NotFound(_) => StatusCode::NOT_FOUND,
        PollError::DuplicateVote(_) | PollError::Inactive(_) | PollError::Expired(_) => {
            StatusCode::CONFLICT
        }
        PollError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn handle_poll_error(error: PollError) -> Response {
    let status = status_for(&error);
    // Storage details stay in the logs
    let message = match &error {
        PollError::Storage(_) => "Internal server error".to_string(),
        other => other.message(),
    };
    respond(status, ApiResponse::error(error.code(), message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ValidationError;

    #[test]
    fn validation_maps_to_400() {
        let error = PollError::Validation(ValidationError::empty_field("question"));
        assert_eq!(handle_poll_error(error).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_option_maps_to_400() {
        let error = PollError::InvalidOption(OptionId::new());
        assert_eq!(status_for(&error), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let error = PollError::NotFound(PollId::new());
        assert_eq!(handle_poll_error(error).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn voting_conflicts_map_to_409() {
        let id = PollId::new();
        for error in [
            PollError::DuplicateVote(id),
            PollError::Inactive(id),
            PollError::Expired(id),
        ] {
            assert_eq!(status_for(&error), StatusCode::CONFLICT);
        }
    }

    #[test]
    fn storage_maps_to_500() {
        let error = PollError::storage("connection reset");
        assert_eq!(
            handle_poll_error(error).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

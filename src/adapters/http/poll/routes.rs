//! HTTP routes for poll endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_poll, delete_poll, get_poll, list_polls, vote_on_poll, PollHandlers};

/// Creates the poll router; mount it under `/api/v1/polls`.
pub fn poll_routes(handlers: PollHandlers) -> Router {
    Router::new()
        .route("/", post(create_poll).get(list_polls))
        .route("/:id", get(get_poll).delete(delete_poll))
        .route("/:id/vote", post(vote_on_poll))
        .with_state(handlers)
}

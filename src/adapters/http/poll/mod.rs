//! HTTP adapter for poll endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreatePollRequest, ListPollsParams, VoteRequest};
pub use handlers::{status_for, PollHandlers};
pub use routes::poll_routes;

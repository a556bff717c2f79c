//! Voter identity extractor.
//!
//! There is no authentication: a voter is whoever the network says is
//! calling. Proxy headers win over the socket address so deployments behind
//! a load balancer still tell clients apart.

use std::net::SocketAddr;

use async_trait::async_trait;
use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, HeaderMap},
    response::Response,
};

use super::response::bad_request;
use crate::domain::foundation::VoterId;

/// Identifier used when nothing about the caller is known.
pub const UNKNOWN_VOTER: &str = "unknown";

/// The calling voter, resolved from proxy headers or the peer address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoterIdentity(pub VoterId);

/// Resolution order: first `X-Forwarded-For` entry, `X-Real-IP`, peer IP,
/// then [`UNKNOWN_VOTER`].
pub fn resolve_voter(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let real_ip = || {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    forwarded
        .or_else(real_ip)
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| UNKNOWN_VOTER.to_string())
}

#[async_trait]
impl<S> FromRequestParts<S> for VoterIdentity
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        VoterId::new(resolve_voter(&parts.headers, peer))
            .map(VoterIdentity)
            .map_err(|e| bad_request(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> Option<SocketAddr> {
        Some("192.0.2.10:54321".parse().unwrap())
    }

    #[test]
    fn first_forwarded_entry_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.1"));

        assert_eq!(resolve_voter(&headers, peer()), "203.0.113.7");
    }

    #[test]
    fn real_ip_used_without_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.1"));

        assert_eq!(resolve_voter(&headers, peer()), "198.51.100.1");
    }

    #[test]
    fn blank_headers_fall_through_to_peer_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(" "));

        assert_eq!(resolve_voter(&headers, peer()), "192.0.2.10");
    }

    #[test]
    fn unknown_without_any_source() {
        assert_eq!(resolve_voter(&HeaderMap::new(), None), UNKNOWN_VOTER);
    }
}

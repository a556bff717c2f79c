//! CORS configuration
//!
//! List values arrive as comma-separated strings so they can be set from a
//! single environment variable.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Cross-origin policy for the HTTP API
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins, comma-separated; `*` allows any origin
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,

    /// Allowed methods, comma-separated
    #[serde(default = "default_allowed_methods")]
    pub allowed_methods: String,

    /// Allowed request headers, comma-separated
    #[serde(default = "default_allowed_headers")]
    pub allowed_headers: String,

    /// Response headers exposed to the browser, comma-separated
    #[serde(default = "default_exposed_headers")]
    pub exposed_headers: String,

    /// Whether cookies and credentials are allowed
    #[serde(default)]
    pub allow_credentials: bool,

    /// Preflight cache lifetime in seconds
    #[serde(default = "default_max_age")]
    pub max_age_secs: u64,
}

impl CorsConfig {
    pub fn origins(&self) -> Vec<String> {
        split_list(&self.allowed_origins)
    }

    pub fn methods(&self) -> Vec<String> {
        split_list(&self.allowed_methods)
    }

    pub fn headers(&self) -> Vec<String> {
        split_list(&self.allowed_headers)
    }

    pub fn exposed(&self) -> Vec<String> {
        split_list(&self.exposed_headers)
    }

    /// True when any origin is allowed.
    pub fn allows_any_origin(&self) -> bool {
        self.origins().iter().any(|origin| origin == "*")
    }

    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_secs)
    }

    /// Validate CORS configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.allows_any_origin() {
            if self.allow_credentials {
                return Err(ValidationError::WildcardWithCredentials);
            }
            return Ok(());
        }
        for origin in self.origins() {
            if !origin.starts_with("http://") && !origin.starts_with("https://") {
                return Err(ValidationError::InvalidCorsOrigin(origin));
            }
        }
        Ok(())
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
            allowed_methods: default_allowed_methods(),
            allowed_headers: default_allowed_headers(),
            exposed_headers: default_exposed_headers(),
            allow_credentials: false,
            max_age_secs: default_max_age(),
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn default_allowed_origins() -> String {
    "*".to_string()
}

fn default_allowed_methods() -> String {
    "GET,POST,PUT,DELETE,OPTIONS".to_string()
}

fn default_allowed_headers() -> String {
    "Accept,Authorization,Content-Type,X-Request-ID".to_string()
}

fn default_exposed_headers() -> String {
    "Content-Length,X-Request-ID".to_string()
}

fn default_max_age() -> u64 {
    300
}

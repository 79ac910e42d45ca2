//! Atlassian wiki REST API client.
//!
//! Provides sync HTTP client for the Confluence Cloud REST API
//! with basic (username + API token) authentication.

mod children;
mod pages;

use std::fmt;
use std::time::{Duration, Instant};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, warn};
use ureq::Agent;

use crate::error::WikiError;

/// Wiki base URL of an Atlassian Cloud site.
pub fn cloud_base_url(company: &str) -> String {
    format!("https://{company}.atlassian.net/wiki")
}

/// Atlassian wiki REST API client.
///
/// Identity is fixed at construction; the client is safe to share between threads.
pub struct WikiClient {
    agent: Agent,
    base_url: String,
    username: String,
    token: String,
    timeout: Option<Duration>,
}

impl WikiClient {
    /// Create client for the wiki of an Atlassian Cloud site.
    ///
    /// The base URL is `https://{company}.atlassian.net/wiki`. No validation
    /// or network access happens here; bad values surface as request errors.
    pub fn new(company: &str, username: &str, token: &str) -> Self {
        Self::with_base_url(&cloud_base_url(company), username, token)
    }

    /// Create client against an explicit wiki base URL.
    ///
    /// Requests are not time-limited beyond the transport defaults.
    pub fn with_base_url(base_url: &str, username: &str, token: &str) -> Self {
        Self::build(base_url, username, token, None)
    }

    /// Create client against an explicit wiki base URL with a global request timeout.
    pub fn with_timeout(base_url: &str, username: &str, token: &str, timeout: Duration) -> Self {
        Self::build(base_url, username, token, Some(timeout))
    }

    fn build(base_url: &str, username: &str, token: &str, timeout: Option<Duration>) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(timeout)
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            username: username.to_owned(),
            token: token.to_owned(),
            timeout,
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Global request timeout, if one was configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Value of the `Authorization` header.
    fn auth_header(&self) -> String {
        let credentials = format!("{}:{}", self.username, self.token);
        format!("Basic {}", STANDARD.encode(credentials))
    }

    /// Perform an authenticated GET against `{base_url}{path}` and return the raw body.
    ///
    /// `path` must already be escaped. Any status outside 2xx fails with
    /// [`WikiError::RequestFailed`] carrying the body verbatim.
    fn get(&self, path: &str, deadline: Option<Instant>) -> Result<Vec<u8>, WikiError> {
        let url = format!("{}{}", self.base_url, path);

        let request = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header())
            .header("Accept", "application/json");

        let response = match deadline {
            Some(deadline) => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    return Err(WikiError::DeadlineExceeded);
                }
                request
                    .config()
                    .timeout_global(Some(remaining))
                    .build()
                    .call()?
            }
            None => request.call()?,
        };

        let status = response.status();
        debug!("GET {} -> {}", url, status.as_u16());

        // Read the whole body regardless of size
        let mut body = response.into_body();
        let body = body.with_config().limit(u64::MAX).read_to_vec()?;

        if !status.is_success() {
            warn!("Request to {} failed with status {}", url, status.as_u16());
            return Err(WikiError::RequestFailed {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body)
    }
}

impl fmt::Debug for WikiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WikiClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

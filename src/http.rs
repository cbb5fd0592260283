//! Shared HTTP client for backend search requests.
//!
//! Provides a configured [`reqwest::Client`] with the cookie store enabled
//! so the CRM session cookie travels with every request, mirroring the
//! browser's `credentials: include` fetch mode.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

use crate::config::SearchConfig;
use crate::error::SearchError;

/// Build a [`reqwest::Client`] configured for CRM search requests.
///
/// The client has:
/// - Cookie store enabled (session authentication)
/// - `Accept: application/json` on every request
/// - Request timeout from config
///
/// # Errors
///
/// Returns [`SearchError::Transport`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .default_headers(headers)
        .build()
        .map_err(|e| SearchError::Transport(format!("failed to build HTTP client: {e}")))
}

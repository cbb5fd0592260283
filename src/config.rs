//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls the backend base URL, which query mode runs,
//! debounce and cache behaviour. The defaults match the production CRM
//! search UI: 300 ms debounce, 2-character minimum, 100-entry cache with a
//! one-minute TTL.

use crate::error::SearchError;
use crate::types::SearchContext;

/// Configuration for a search orchestrator instance.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Base URL of the CRM API, without a trailing path.
    pub base_url: String,
    /// Which backend query mode searches run against.
    pub context: SearchContext,
    /// Whether contact results are requested alongside customers.
    pub include_contacts: bool,
    /// Whether inactive records are included.
    pub include_inactive: bool,
    /// Maximum number of results requested from the backend.
    pub limit: usize,
    /// How long input must stay unchanged before a search fires.
    pub debounce_ms: u64,
    /// Queries shorter than this never reach the cache or the network.
    pub min_query_length: usize,
    /// Maximum number of cached result sets.
    pub cache_capacity: usize,
    /// How long a cached result set stays valid.
    pub cache_ttl_ms: u64,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".into(),
            context: SearchContext::Customers,
            include_contacts: true,
            include_inactive: false,
            limit: 10,
            debounce_ms: 300,
            min_query_length: 2,
            cache_capacity: 100,
            cache_ttl_ms: 60_000,
            timeout_seconds: 8,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `base_url` must be a parseable absolute URL
    /// - `limit` must be greater than 0
    /// - `min_query_length` must be greater than 0
    /// - `cache_capacity` must be greater than 0
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.base_url.trim().is_empty() {
            return Err(SearchError::Config("base_url must not be empty".into()));
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| SearchError::Config(format!("base_url is not a valid URL: {e}")))?;
        if self.limit == 0 {
            return Err(SearchError::Config("limit must be greater than 0".into()));
        }
        if self.min_query_length == 0 {
            return Err(SearchError::Config(
                "min_query_length must be greater than 0".into(),
            ));
        }
        if self.cache_capacity == 0 {
            return Err(SearchError::Config(
                "cache_capacity must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

//! Trait definition for pluggable search backends.
//!
//! Each backend query mode (universal, fuzzy lead search) implements
//! [`SearchBackendTrait`] to provide a uniform interface: execute the
//! query against its endpoint and normalise the response into the common
//! [`SearchResults`] model.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::{Query, SearchContext, SearchResults};

/// A pluggable search backend.
///
/// Implementors own their endpoint's full request/response cycle:
///
/// - URL and query-string construction
/// - HTTP status handling (non-2xx becomes [`SearchError::Http`])
/// - Response parsing and normalisation into [`SearchResults`]
///
/// All implementations must be `Send + Sync` so fetches can be dispatched
/// onto the runtime.
pub trait SearchBackendTrait: Send + Sync {
    /// Execute `query` and return normalised results.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the request fails, the backend reports a
    /// non-success status, or the response cannot be parsed.
    fn fetch(
        &self,
        query: &Query,
        config: &SearchConfig,
        client: &reqwest::Client,
    ) -> impl std::future::Future<Output = Result<SearchResults, SearchError>> + Send;

    /// Which [`SearchContext`] this backend serves.
    fn context(&self) -> SearchContext;
}

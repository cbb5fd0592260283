//! Routing of a query to the backend serving its context.

use crate::backend::SearchBackendTrait;
use crate::backends::{FuzzyLeadBackend, UniversalBackend};
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::{Query, SearchContext, SearchResults};

/// Execute `query` against the backend selected by `query.context` and
/// return results normalised into the common model.
///
/// # Errors
///
/// Propagates the backend's [`SearchError`]: HTTP status failures,
/// transport errors, and parse errors.
pub async fn route(
    query: &Query,
    config: &SearchConfig,
    client: &reqwest::Client,
) -> Result<SearchResults, SearchError> {
    match query.context {
        SearchContext::Customers => UniversalBackend.fetch(query, config, client).await,
        SearchContext::Leads => FuzzyLeadBackend.fetch(query, config, client).await,
    }
}

//! Quick search — the lightweight autocomplete variant.
//!
//! Hits `/api/search/quick`, which answers with the same envelope as the
//! universal endpoint but skips detailed scoring. Quick search sits outside
//! the orchestrator: no debounce, no cache, no context routing. It backs
//! the one-shot [`quick_search`](crate::quick_search) entry point.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::SearchResults;

use super::universal::parse_universal_body;

/// Fetch autocomplete results for `text`, at most `limit` of them.
pub(crate) async fn fetch_quick(
    text: &str,
    limit: usize,
    config: &SearchConfig,
    client: &reqwest::Client,
) -> Result<SearchResults, SearchError> {
    tracing::trace!(text, limit, "quick search");

    let url = format!("{}/api/search/quick", config.base_url.trim_end_matches('/'));
    let response = client
        .get(&url)
        .query(&[("query", text.to_string()), ("limit", limit.to_string())])
        .send()
        .await
        .map_err(|e| SearchError::Transport(format!("quick search request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SearchError::Http {
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| SearchError::Transport(format!("quick search body read failed: {e}")))?;

    parse_universal_body(&body)
}

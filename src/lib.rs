//! # crm-search
//!
//! Embedded client-side search orchestration for CRM front ends.
//!
//! This crate turns raw keystrokes into deduplicated, cancelled-in-time,
//! cached, relevance-ranked search results merged from two backend query
//! modes. It compiles into the front end as a library dependency — the
//! rendering layer only ever consumes the published [`SearchState`].
//!
//! ## Design
//!
//! - Debounces input and fires at most one search per settling period
//! - At most one request in flight; superseded responses are discarded by
//!   a token-identity check, so published state always reflects the most
//!   recently issued query
//! - Bounded result cache (insertion-age eviction, per-entry TTL)
//! - Routes to the universal or fuzzy-lead endpoint by search context and
//!   normalises both response shapes into one result model
//!
//! ## Security
//!
//! - No network listeners — this is a library, not a server
//! - The session cookie travels via the client's cookie store; no tokens
//!   are handled here
//! - Query text is logged only at trace level
//!
//! ## Example
//!
//! ```no_run
//! # async fn example() -> crm_search::Result<()> {
//! use crm_search::{SearchConfig, SearchOrchestrator, SearchPhase};
//!
//! let handle = SearchOrchestrator::spawn(SearchConfig::default())?;
//! let mut states = handle.subscribe();
//!
//! handle.search("schmidt").await?;
//! let settled = states
//!     .wait_for(|state| state.phase == SearchPhase::Settled)
//!     .await
//!     .expect("orchestrator running");
//! if let Some(results) = &settled.results {
//!     println!("{} hits", results.total_count);
//! }
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod backends;
pub mod cache;
pub mod config;
pub mod coordinator;
pub mod debounce;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod router;
pub mod types;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use orchestrator::{SearchHandle, SearchOrchestrator, SearchPhase, SearchState};
pub use types::{
    ContactRecord, CustomerRecord, EntryKind, Query, QueryType, ResultEntry, SearchContext,
    SearchMetadata, SearchResults,
};

/// Execute one search directly, bypassing debounce and cache.
///
/// Routes to the backend selected by `config.context` and returns the
/// normalised results. Useful for programmatic lookups; interactive input
/// should go through [`SearchOrchestrator`] instead.
///
/// # Errors
///
/// Returns [`SearchError::Config`] for invalid configuration, or the
/// routed backend's HTTP/transport/parse error.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> crm_search::Result<()> {
/// let config = crm_search::SearchConfig::default();
/// let results = crm_search::search_once("schmidt", &config).await?;
/// for entry in &results.customers {
///     println!("{}: {}", entry.data.company_name, entry.relevance_score);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_once(text: &str, config: &SearchConfig) -> Result<SearchResults> {
    config.validate()?;
    let client = http::build_client(config)?;
    let query = Query::from_config(text.trim(), config);
    router::route(&query, config, &client).await
}

/// Autocomplete lookup against the quick-search endpoint.
///
/// No debounce, no cache, no context routing; input shorter than one
/// character yields empty results without a network call.
///
/// # Errors
///
/// Same as [`search_once`].
pub async fn quick_search(text: &str, limit: usize, config: &SearchConfig) -> Result<SearchResults> {
    config.validate()?;
    let text = text.trim();
    if text.is_empty() {
        return Ok(SearchResults::default());
    }
    let client = http::build_client(config)?;
    backends::quick::fetch_quick(text, limit, config, &client).await
}

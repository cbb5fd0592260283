//! Error types for the crm-search crate.
//!
//! Cancellation is deliberately absent from this taxonomy: a superseded
//! request is discarded inside the orchestrator and never surfaces as an
//! error. Everything that does surface carries a stable, human-readable
//! message suitable for direct display next to a retry affordance.

/// Errors that can occur during search operations.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The backend answered with a non-success HTTP status.
    #[error("search request failed with HTTP status {status}")]
    Http {
        /// The status code reported by the backend.
        status: u16,
    },

    /// The request could not be sent or the response body could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body was not the expected JSON shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The orchestrator task has shut down and no longer accepts commands.
    #[error("search orchestrator is no longer running")]
    Closed,
}

/// Convenience type alias for crm-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

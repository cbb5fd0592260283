//! Event-driven search orchestration.
//!
//! The orchestrator runs as a single spawned task that owns every piece of
//! mutable state in the pipeline: the debouncer, the result cache and the
//! request coordinator. All transitions are driven by messages — raw input,
//! a debounce timer firing, a response arriving, an explicit clear — so the
//! three observable phases (`Idle`, `Searching`, `Settled`) move without
//! locks and without nested callbacks.
//!
//! State is published through a [`watch`] channel: subscribers always see
//! the result of the most recently issued query, never an older one.

use std::time::Duration;

use tokio::sync::{mpsc, watch};

use crate::cache::ResultCache;
use crate::config::SearchConfig;
use crate::coordinator::{RequestCoordinator, RequestToken};
use crate::debounce::Debouncer;
use crate::error::{Result, SearchError};
use crate::http;
use crate::router;
use crate::types::{Query, SearchResults};

/// Channel buffer sizes.
const COMMAND_CHANNEL_SIZE: usize = 16;
const TIMER_CHANNEL_SIZE: usize = 16;
const RESPONSE_CHANNEL_SIZE: usize = 8;

/// Observable phase of the search pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// No query, or input below the minimum length.
    Idle,
    /// Debounce has elapsed, the cache missed, a request is in flight.
    Searching,
    /// A request finished with data or with an error, or the cache hit.
    Settled,
}

/// Snapshot published to subscribers after every transition.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub phase: SearchPhase,
    /// Present in `Settled` on success and on cache hits. While a new
    /// request is `Searching`, the previous results remain visible.
    pub results: Option<SearchResults>,
    /// Present in `Settled` on failure; `results` is cleared then so stale
    /// data is never shown alongside an error.
    pub error: Option<String>,
}

impl SearchState {
    fn idle() -> Self {
        Self {
            phase: SearchPhase::Idle,
            results: None,
            error: None,
        }
    }

    fn settled_ok(results: SearchResults) -> Self {
        Self {
            phase: SearchPhase::Settled,
            results: Some(results),
            error: None,
        }
    }

    fn settled_err(message: String) -> Self {
        Self {
            phase: SearchPhase::Settled,
            results: None,
            error: Some(message),
        }
    }

    /// True while a request is in flight — drive a loading indicator off this.
    pub fn is_loading(&self) -> bool {
        self.phase == SearchPhase::Searching
    }
}

/// Commands accepted from [`SearchHandle`]s.
#[derive(Debug)]
enum Command {
    Input(String),
    Clear,
}

/// Cloneable handle to a running orchestrator.
#[derive(Debug, Clone)]
pub struct SearchHandle {
    commands: mpsc::Sender<Command>,
    state: watch::Receiver<SearchState>,
}

impl SearchHandle {
    /// Feed new raw input. The search fires once the input stops changing
    /// for the configured debounce window; intermediate values are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Closed`] if the orchestrator task is gone.
    pub async fn search(&self, text: impl Into<String>) -> Result<()> {
        self.commands
            .send(Command::Input(text.into()))
            .await
            .map_err(|_| SearchError::Closed)
    }

    /// Cancel any live request and reset published state to idle.
    ///
    /// The result cache survives a clear: repeating an earlier query later
    /// in the session is still served without a network call.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Closed`] if the orchestrator task is gone.
    pub async fn clear(&self) -> Result<()> {
        self.commands
            .send(Command::Clear)
            .await
            .map_err(|_| SearchError::Closed)
    }

    /// The most recently published state.
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Subscribe to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.clone()
    }
}

/// The orchestrator task's state. Constructed and consumed by
/// [`SearchOrchestrator::spawn`].
pub struct SearchOrchestrator {
    config: SearchConfig,
    client: reqwest::Client,
    debouncer: Debouncer<String>,
    cache: ResultCache,
    coordinator: RequestCoordinator,
    /// The query behind the live request, kept for cache write-through.
    inflight: Option<Query>,
    timers_tx: mpsc::Sender<u64>,
    responses_tx: mpsc::Sender<(RequestToken, Result<SearchResults>)>,
    state_tx: watch::Sender<SearchState>,
}

impl SearchOrchestrator {
    /// Validate `config`, spawn the orchestrator task and return a handle.
    ///
    /// The task runs until every handle has been dropped; subscribers on
    /// their own do not keep it alive.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] for invalid configuration and
    /// [`SearchError::Transport`] if the HTTP client cannot be built.
    pub fn spawn(config: SearchConfig) -> Result<SearchHandle> {
        config.validate()?;
        let client = http::build_client(&config)?;

        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);
        let (timers_tx, timers_rx) = mpsc::channel(TIMER_CHANNEL_SIZE);
        let (responses_tx, responses_rx) = mpsc::channel(RESPONSE_CHANNEL_SIZE);
        let (state_tx, state_rx) = watch::channel(SearchState::idle());

        let orchestrator = Self {
            debouncer: Debouncer::new(Duration::from_millis(config.debounce_ms)),
            cache: ResultCache::new(
                config.cache_capacity,
                Duration::from_millis(config.cache_ttl_ms),
            ),
            coordinator: RequestCoordinator::new(),
            inflight: None,
            config,
            client,
            timers_tx,
            responses_tx,
            state_tx,
        };
        tokio::spawn(orchestrator.run(commands_rx, timers_rx, responses_rx));

        Ok(SearchHandle {
            commands: commands_tx,
            state: state_rx,
        })
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        mut timers: mpsc::Receiver<u64>,
        mut responses: mpsc::Receiver<(RequestToken, Result<SearchResults>)>,
    ) {
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Input(text)) => self.on_input(text),
                    Some(Command::Clear) => self.on_clear(),
                    None => break,
                },
                Some(stamp) = timers.recv() => self.on_timer_fired(stamp),
                Some((token, result)) = responses.recv() => self.on_response(token, result),
            }
        }
        self.coordinator.cancel();
        tracing::debug!("search orchestrator stopped");
    }

    /// Raw input: push into the debouncer and arm its timer.
    fn on_input(&mut self, text: String) {
        let stamp = self.debouncer.push(text);
        let delay = self.debouncer.delay();
        let timers = self.timers_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = timers.send(stamp).await;
        });
    }

    /// Debounce settled: decide between idle, cache hit and dispatch.
    fn on_timer_fired(&mut self, stamp: u64) {
        let Some(raw) = self.debouncer.settle(stamp) else {
            // Superseded by newer input before the window closed.
            return;
        };

        let text = raw.trim();
        if text.chars().count() < self.config.min_query_length {
            // Below the minimum: no cache interaction, no network call.
            self.coordinator.cancel();
            self.inflight = None;
            self.publish(SearchState::idle());
            return;
        }

        let query = Query::from_config(text, &self.config);
        if let Some(results) = self.cache.lookup(&query) {
            tracing::debug!(text = %query.text, "cache hit");
            let results = results.clone();
            self.coordinator.cancel();
            self.inflight = None;
            self.publish(SearchState::settled_ok(results));
            return;
        }

        tracing::debug!(text = %query.text, context = %query.context, "cache miss, dispatching");
        self.state_tx.send_modify(|state| {
            state.phase = SearchPhase::Searching;
            state.error = None;
        });

        let client = self.client.clone();
        let config = self.config.clone();
        let routed = query.clone();
        let fut = async move { router::route(&routed, &config, &client).await };
        self.coordinator.dispatch(fut, self.responses_tx.clone());
        self.inflight = Some(query);
    }

    /// A fetch completed. Apply it only if its token is still the live one.
    fn on_response(&mut self, token: RequestToken, result: Result<SearchResults>) {
        if !self.coordinator.is_live(token) {
            tracing::trace!("discarding superseded search response");
            return;
        }
        self.coordinator.finish(token);

        match result {
            Ok(results) => {
                if let Some(query) = self.inflight.take() {
                    self.cache.insert(query, results.clone());
                }
                self.publish(SearchState::settled_ok(results));
            }
            Err(err) => {
                self.inflight = None;
                tracing::warn!(error = %err, "search request failed");
                self.publish(SearchState::settled_err(err.to_string()));
            }
        }
    }

    /// Explicit clear: back to idle. The cache is deliberately untouched.
    fn on_clear(&mut self) {
        self.coordinator.cancel();
        self.debouncer.discard();
        self.inflight = None;
        self.publish(SearchState::idle());
    }

    fn publish(&self, state: SearchState) {
        self.state_tx.send_replace(state);
    }
}

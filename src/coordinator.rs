//! Single-live-request coordination with cooperative cancellation.
//!
//! The coordinator enforces the core race guard of the search pipeline:
//! at most one fetch is live at any time, and a response is only applied
//! when its token is still the live one. Cancellation of a superseded
//! fetch is advisory — the correctness guarantee is the token check at
//! response-apply time, not the transport abort.

use std::future::Future;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Opaque handle identifying one dispatched fetch.
///
/// Minted by [`RequestCoordinator::dispatch`]; compared by identity when a
/// response arrives. Tokens are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Owner of the single-live-request invariant.
#[derive(Debug, Default)]
pub struct RequestCoordinator {
    generation: u64,
    live: Option<(RequestToken, CancellationToken)>,
}

impl RequestCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch `fut` as the new live fetch, superseding any previous one.
    ///
    /// The previous fetch (if any) is cancelled: its future is dropped at
    /// the next await point and nothing is delivered for it. When `fut`
    /// completes, `(token, output)` is sent on `tx`; the receiver must
    /// still check [`is_live`](Self::is_live) before applying the output,
    /// since a fetch can complete in the same instant it is superseded.
    pub fn dispatch<T, F>(&mut self, fut: F, tx: mpsc::Sender<(RequestToken, T)>) -> RequestToken
    where
        T: Send + 'static,
        F: Future<Output = T> + Send + 'static,
    {
        self.cancel();
        self.generation += 1;
        let token = RequestToken(self.generation);
        let cancel = CancellationToken::new();
        self.live = Some((token, cancel.clone()));

        tokio::spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => {
                    tracing::trace!("superseded fetch dropped before completion");
                }
                output = fut => {
                    let _ = tx.send((token, output)).await;
                }
            }
        });

        token
    }

    /// Whether `token` still identifies the live fetch.
    pub fn is_live(&self, token: RequestToken) -> bool {
        matches!(self.live, Some((live, _)) if live == token)
    }

    /// Mark the live fetch as settled once its response has been applied.
    pub fn finish(&mut self, token: RequestToken) {
        if self.is_live(token) {
            self.live = None;
        }
    }

    /// Cancel the live fetch, if any. No token is live afterwards.
    pub fn cancel(&mut self) {
        if let Some((_, cancel)) = self.live.take() {
            cancel.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn dispatch_delivers_token_and_output() {
        let mut coordinator = RequestCoordinator::new();
        let (tx, mut rx) = mpsc::channel(4);

        let token = coordinator.dispatch(async { 7u32 }, tx);
        let (received, output) = rx.recv().await.expect("should deliver");

        assert_eq!(received, token);
        assert_eq!(output, 7);
        assert!(coordinator.is_live(token));
    }

    #[tokio::test]
    async fn new_dispatch_supersedes_previous() {
        let mut coordinator = RequestCoordinator::new();
        let (tx, mut rx) = mpsc::channel(4);

        let first = coordinator.dispatch(std::future::pending::<u32>(), tx.clone());
        let second = coordinator.dispatch(async { 2u32 }, tx);

        assert!(!coordinator.is_live(first));
        assert!(coordinator.is_live(second));

        let (received, output) = rx.recv().await.expect("second should deliver");
        assert_eq!(received, second);
        assert_eq!(output, 2);
    }

    #[tokio::test]
    async fn cancelled_fetch_delivers_nothing() {
        let mut coordinator = RequestCoordinator::new();
        let (tx, mut rx) = mpsc::channel::<(RequestToken, u32)>(4);

        let token = coordinator.dispatch(
            async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                1u32
            },
            tx,
        );
        coordinator.cancel();
        assert!(!coordinator.is_live(token));

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn late_completion_of_superseded_fetch_fails_live_check() {
        let mut coordinator = RequestCoordinator::new();
        let (tx, mut rx) = mpsc::channel(4);

        // A fetch that completes immediately, delivered before being superseded.
        let first = coordinator.dispatch(async { 1u32 }, tx.clone());
        let (received, _) = rx.recv().await.expect("first delivers");
        assert_eq!(received, first);

        // Superseding mints a new token; the first response must now be
        // rejected by the identity check even though it was delivered.
        let second = coordinator.dispatch(std::future::pending::<u32>(), tx);
        assert!(!coordinator.is_live(first));
        assert!(coordinator.is_live(second));
    }

    #[tokio::test]
    async fn finish_clears_the_live_token() {
        let mut coordinator = RequestCoordinator::new();
        let (tx, mut rx) = mpsc::channel(4);

        let token = coordinator.dispatch(async { 1u32 }, tx);
        rx.recv().await.expect("delivers");

        coordinator.finish(token);
        assert!(!coordinator.is_live(token));
    }

    #[tokio::test]
    async fn finish_ignores_stale_tokens() {
        let mut coordinator = RequestCoordinator::new();
        let (tx, _rx) = mpsc::channel::<(RequestToken, u32)>(4);

        let first = coordinator.dispatch(std::future::pending::<u32>(), tx.clone());
        let second = coordinator.dispatch(std::future::pending::<u32>(), tx);

        coordinator.finish(first);
        assert!(coordinator.is_live(second));
    }

    #[test]
    fn tokens_are_never_reused() {
        let mut coordinator = RequestCoordinator::new();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime");
        let _guard = runtime.enter();

        let (tx, _rx) = mpsc::channel::<(RequestToken, u32)>(4);
        let first = coordinator.dispatch(std::future::pending::<u32>(), tx.clone());
        coordinator.cancel();
        let second = coordinator.dispatch(std::future::pending::<u32>(), tx);
        assert_ne!(first, second);
    }
}

//! Request-state tracking around async operations
//!
//! A [`RequestTracker`] wraps one logical kind of request and exposes its
//! progress and last error as a [`RequestState`] that views can read or
//! subscribe to.
//!
//! # Example
//! ```no_run
//! use market_dashboard_sdk::RequestTracker;
//!
//! # async fn example() {
//! let tracker = RequestTracker::new();
//! let result: Result<u32, String> = tracker.run(|| async { Err("boom".to_string()) }).await;
//! assert!(result.is_err());
//! assert_eq!(tracker.last_error().as_deref(), Some("boom"));
//! # }
//! ```

use crate::{constants::FALLBACK_ERROR_MESSAGE, error::ProviderError, types::RequestState};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// Errors that can be shown to a user as a single line of text
///
/// Returning `None` means the value carries nothing displayable and the
/// tracker falls back to a generic message.
pub trait ErrorMessage {
    fn error_message(&self) -> Option<String>;
}

impl ErrorMessage for ProviderError {
    fn error_message(&self) -> Option<String> {
        if let Some(message) = self.body_message() {
            return Some(message.to_string());
        }
        match self {
            // The transport's own text, not our "Network error:" wrapper
            ProviderError::Network(e) => Some(e.to_string()),
            other => Some(other.to_string()),
        }
    }
}

impl ErrorMessage for String {
    fn error_message(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl ErrorMessage for &str {
    fn error_message(&self) -> Option<String> {
        Some((*self).to_string())
    }
}

impl ErrorMessage for Box<dyn std::error::Error + Send + Sync> {
    fn error_message(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl ErrorMessage for Box<dyn std::error::Error> {
    fn error_message(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl ErrorMessage for std::io::Error {
    fn error_message(&self) -> Option<String> {
        Some(self.to_string())
    }
}

macro_rules! opaque_error_values {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ErrorMessage for $ty {
                fn error_message(&self) -> Option<String> {
                    None
                }
            }
        )*
    };
}

opaque_error_values!((), bool, i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

/// Derives the display message for a failure
pub fn describe_error<E: ErrorMessage + ?Sized>(error: &E) -> String {
    error
        .error_message()
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}

/// Outcome of a tracked call
#[derive(Debug)]
pub struct Tracked<R> {
    /// What the operation returned
    pub outcome: R,
    /// False when a newer call on the same tracker started before this one
    /// finished; such a call leaves the tracker state alone
    pub current: bool,
    /// Generation number of this call, see [`RequestTracker::is_current`]
    pub ticket: u64,
}

/// A started call that has not settled the tracker yet
///
/// Dropping it unsettled (the caller's future was cancelled) returns the
/// tracker to idle if no newer call took over in the meantime.
struct InFlight<'a> {
    tracker: &'a RequestTracker,
    ticket: u64,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(mut self, next: RequestState) -> bool {
        self.settled = true;
        self.tracker.settle(self.ticket, next)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled && self.tracker.settle(self.ticket, RequestState::default()) {
            tracing::debug!(ticket = self.ticket, "Tracked request cancelled");
        }
    }
}

/// Tracks progress and the last error of one kind of request
#[derive(Debug)]
pub struct RequestTracker {
    state: watch::Sender<RequestState>,
    /// Bumped on every call while holding the watch lock
    generation: AtomicU64,
}

impl Default for RequestTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestTracker {
    /// Creates an idle tracker
    pub fn new() -> Self {
        let (state, _) = watch::channel(RequestState::default());
        Self {
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Runs `operation` with progress and error tracking
    ///
    /// The returned result is exactly what the operation produced. On
    /// failure the derived message is stored as the last error.
    pub async fn run<T, E, F, Fut>(&self, operation: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: ErrorMessage,
    {
        self.track(operation).await.outcome
    }

    /// Like [`run`](Self::run), also reporting whether this call still owns
    /// the tracker state when it completes
    pub async fn track<T, E, F, Fut>(&self, operation: F) -> Tracked<Result<T, E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: ErrorMessage,
    {
        let mut ticket = 0;
        self.state.send_modify(|state| {
            ticket = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
            *state = RequestState::loading();
        });
        let in_flight = InFlight {
            tracker: self,
            ticket,
            settled: false,
        };

        let outcome = operation().await;

        let next = match &outcome {
            Ok(_) => RequestState::default(),
            Err(e) => {
                let message = describe_error(e);
                tracing::debug!(error = %message, "Tracked request failed");
                RequestState::failed(message)
            }
        };

        let current = in_flight.settle(next);
        if !current {
            tracing::debug!(ticket, "Tracked request superseded by a newer call");
        }

        Tracked {
            outcome,
            current,
            ticket,
        }
    }

    /// Whether `ticket` belongs to the most recently started call
    pub fn is_current(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::Acquire) == ticket
    }

    /// Applies `next` if `ticket` still owns the state
    fn settle(&self, ticket: u64, next: RequestState) -> bool {
        self.state.send_if_modified(|state| {
            if self.is_current(ticket) {
                *state = next;
                true
            } else {
                false
            }
        })
    }

    /// Clears the progress flag and the last error
    pub fn reset(&self) {
        self.state.send_replace(RequestState::default());
    }

    /// Snapshot of the current state
    pub fn state(&self) -> RequestState {
        self.state.borrow().clone()
    }

    pub fn in_progress(&self) -> bool {
        self.state.borrow().in_progress
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.borrow().last_error.clone()
    }

    /// Subscribes to state changes
    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_run_success_returns_value() {
        let tracker = RequestTracker::new();
        let result: Result<Vec<u32>, String> = tracker.run(|| async { Ok(vec![1, 2, 3]) }).await;

        assert_eq!(result.unwrap(), vec![1, 2, 3]);
        assert_eq!(tracker.state(), RequestState::default());
    }

    #[tokio::test]
    async fn test_in_progress_while_running() {
        let owned = RequestTracker::new();
        let tracker = &owned;
        let (tx, rx) = oneshot::channel::<u32>();

        let run = tracker.run(|| async move { rx.await.map_err(|_| "closed".to_string()) });
        let check = async move {
            tokio::task::yield_now().await;
            assert!(tracker.in_progress());
            assert!(tracker.last_error().is_none());
            tx.send(7).unwrap();
        };

        let (result, ()) = tokio::join!(run, check);
        assert_eq!(result.unwrap(), 7);
        assert!(!tracker.in_progress());
    }

    #[tokio::test]
    async fn test_structured_body_message_wins() {
        let tracker = RequestTracker::new();
        let result: Result<(), ProviderError> = tracker
            .run(|| async {
                Err(ProviderError::RateLimitExceeded {
                    message: Some("rate limited".to_string()),
                })
            })
            .await;

        assert!(matches!(
            result,
            Err(ProviderError::RateLimitExceeded { .. })
        ));
        assert!(!tracker.in_progress());
        assert_eq!(tracker.last_error().as_deref(), Some("rate limited"));
    }

    #[tokio::test]
    async fn test_transport_error_without_body() {
        let tracker = RequestTracker::new();
        let _ = tracker
            .run(|| async { Err::<(), _>(ProviderError::api(503, None)) })
            .await;
        assert_eq!(
            tracker.last_error().as_deref(),
            Some("Request failed with status code 503")
        );
    }

    #[tokio::test]
    async fn test_generic_error_message() {
        let tracker = RequestTracker::new();
        let result = tracker
            .run(|| async {
                Err::<(), Box<dyn std::error::Error + Send + Sync>>(
                    std::io::Error::new(std::io::ErrorKind::Other, "disk on fire").into(),
                )
            })
            .await;

        assert!(result.is_err());
        assert_eq!(tracker.last_error().as_deref(), Some("disk on fire"));
    }

    #[tokio::test]
    async fn test_plain_string_is_verbatim() {
        let tracker = RequestTracker::new();
        let result = tracker.run(|| async { Err::<(), _>("boom") }).await;

        assert_eq!(result, Err("boom"));
        assert_eq!(tracker.last_error().as_deref(), Some("boom"));
    }

    #[tokio::test]
    async fn test_unrecognized_value_uses_fallback() {
        let tracker = RequestTracker::new();
        let result = tracker.run(|| async { Err::<(), i32>(42) }).await;

        assert_eq!(result, Err(42));
        assert_eq!(
            tracker.last_error().as_deref(),
            Some("Unexpected error occurred")
        );
    }

    #[tokio::test]
    async fn test_new_call_clears_previous_error() {
        let tracker = RequestTracker::new();
        let _ = tracker.run(|| async { Err::<(), _>("first") }).await;
        assert!(tracker.last_error().is_some());

        let _ = tracker.run(|| async { Ok::<_, String>(()) }).await;
        assert_eq!(tracker.state(), RequestState::default());
    }

    #[tokio::test]
    async fn test_reset() {
        let tracker = RequestTracker::new();
        tracker.reset();
        assert_eq!(tracker.state(), RequestState::default());

        let _ = tracker.run(|| async { Err::<(), _>("boom") }).await;
        tracker.reset();
        assert_eq!(tracker.state(), RequestState::default());
    }

    #[tokio::test]
    async fn test_superseded_call_leaves_state_alone() {
        let owned = RequestTracker::new();
        let tracker = &owned;
        let (slow_tx, slow_rx) = oneshot::channel::<()>();

        let slow = tracker.track(|| async move {
            let _ = slow_rx.await;
            Err::<u32, _>("stale failure")
        });
        let fast = async move {
            tokio::task::yield_now().await;
            let tracked = tracker.track(|| async { Ok::<u32, &str>(2) }).await;
            slow_tx.send(()).unwrap();
            tracked
        };

        let (slow, fast) = tokio::join!(slow, fast);
        assert!(fast.current);
        assert_eq!(fast.outcome, Ok(2));
        assert!(!slow.current);
        assert_eq!(slow.outcome, Err("stale failure"));
        assert_eq!(tracker.state(), RequestState::default());
    }

    #[tokio::test]
    async fn test_cancelled_call_returns_to_idle() {
        let tracker = RequestTracker::new();
        let (_tx, rx) = oneshot::channel::<u32>();

        let result = tokio::time::timeout(
            Duration::from_millis(20),
            tracker.run(|| async move { rx.await.map_err(|_| "closed") }),
        )
        .await;

        assert!(result.is_err());
        assert!(!tracker.in_progress());
        assert_eq!(tracker.state(), RequestState::default());
    }

    #[tokio::test]
    async fn test_cancelled_call_keeps_newer_state() {
        let owned = RequestTracker::new();
        let tracker = &owned;
        let (_tx, rx) = oneshot::channel::<u32>();
        let (gate_tx, gate_rx) = oneshot::channel::<()>();

        let stalled = async move {
            let _ = tokio::time::timeout(
                Duration::from_millis(20),
                tracker.run(|| async move { rx.await.map_err(|_| "closed") }),
            )
            .await;
            gate_tx.send(()).unwrap();
        };
        let newer = async move {
            tokio::task::yield_now().await;
            tracker
                .run(|| async move {
                    let _ = gate_rx.await;
                    Err::<(), _>("newer failure")
                })
                .await
        };

        let ((), result) = tokio::join!(stalled, newer);
        assert_eq!(result, Err("newer failure"));
        assert_eq!(tracker.last_error().as_deref(), Some("newer failure"));
        assert!(!tracker.in_progress());
    }

    #[tokio::test]
    async fn test_is_current_follows_latest_call() {
        let tracker = RequestTracker::new();
        let first = tracker.track(|| async { Ok::<_, &str>(1) }).await;
        assert!(tracker.is_current(first.ticket));

        let second = tracker.track(|| async { Ok::<_, &str>(2) }).await;
        assert!(!tracker.is_current(first.ticket));
        assert!(tracker.is_current(second.ticket));
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let tracker = RequestTracker::new();
        let mut rx = tracker.subscribe();

        let _ = tracker.run(|| async { Err::<(), _>("boom") }).await;

        assert!(rx.has_changed().unwrap());
        let state = rx.borrow_and_update().clone();
        assert_eq!(state.last_error.as_deref(), Some("boom"));
        assert!(!state.in_progress);
    }

    #[test]
    fn test_describe_error() {
        assert_eq!(describe_error(&"x"), "x");
        assert_eq!(describe_error(&()), FALLBACK_ERROR_MESSAGE);
        assert_eq!(
            describe_error(&ProviderError::invalid_request("coin id is empty")),
            "Invalid request: coin id is empty"
        );
    }
}

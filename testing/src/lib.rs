//! # Statecraft Testing
//!
//! Testing utilities and helpers for the Statecraft reducer architecture.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - Helpers for reading store transitions with a timeout
//! - A one-line tracing setup for tests
//!
//! ## Example
//!
//! ```ignore
//! use statecraft_testing::helpers::collect_transitions;
//! use statecraft_runtime::Store;
//!
//! #[tokio::test]
//! async fn test_todo_flow() {
//!     let store = Store::new(TodoReducer::new());
//!     let mut rx = store.subscribe();
//!
//!     store.send(TodoAction::add("buy milk")).await.unwrap();
//!
//!     let transitions = collect_transitions(&mut rx, 1).await.unwrap();
//!     assert_eq!(transitions[0].state.todos.len(), 1);
//! }
//! ```


pub use reducer_test::ReducerTest;

/// Test helpers for stores and listeners
pub mod helpers {
    use statecraft_runtime::{StoreError, Transition};
    use std::time::Duration;
    use tokio::sync::broadcast::{self, error::RecvError};

    /// How long helpers wait for a transition before giving up
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

    /// Receive the next transition, waiting at most [`DEFAULT_TIMEOUT`]
    ///
    /// Returns `Ok(None)` on timeout.
    ///
    /// # Errors
    ///
    /// - [`StoreError::ChannelClosed`] if the store was dropped
    /// - [`StoreError::Lagged`] if the receiver missed transitions
    pub async fn next_transition<S>(
        rx: &mut broadcast::Receiver<Transition<S>>,
    ) -> Result<Option<Transition<S>>, StoreError> {
        match tokio::time::timeout(DEFAULT_TIMEOUT, rx.recv()).await {
            Err(_) => Ok(None),
            Ok(Ok(transition)) => Ok(Some(transition)),
            Ok(Err(RecvError::Closed)) => Err(StoreError::ChannelClosed),
            Ok(Err(RecvError::Lagged(skipped))) => Err(StoreError::Lagged(skipped)),
        }
    }

    /// Collect exactly `count` transitions in order
    ///
    /// # Errors
    ///
    /// - [`StoreError::ChannelClosed`] if the channel closes or times out first
    /// - [`StoreError::Lagged`] if the receiver missed transitions
    pub async fn collect_transitions<S>(
        rx: &mut broadcast::Receiver<Transition<S>>,
        count: usize,
    ) -> Result<Vec<Transition<S>>, StoreError> {
        let mut transitions = Vec::with_capacity(count);
        while transitions.len() < count {
            match next_transition(rx).await? {
                Some(transition) => transitions.push(transition),
                None => return Err(StoreError::ChannelClosed),
            }
        }
        Ok(transitions)
    }

    /// Install a test-friendly tracing subscriber
    ///
    /// Honors `RUST_LOG`; safe to call from every test.
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

pub use helpers::{collect_transitions, init_tracing, next_transition};

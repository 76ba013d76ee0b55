//! # Statecraft Runtime
//!
//! Runtime implementation for the Statecraft reducer architecture.
//!
//! This crate provides the Store that owns the current state of a reducer,
//! applies actions one at a time and broadcasts every resulting state.
//!
//! ## Core Components
//!
//! - **Store**: serializes actions from any number of callers through one reducer
//! - **Transition**: `(revision, action kind, state snapshot)` published after each action
//! - **`StoreConfig`**: broadcast capacity, loadable from the environment
//!
//! ## Example
//!
//! ```ignore
//! use statecraft_runtime::Store;
//!
//! let store = Store::new(my_reducer);
//! let mut transitions = store.subscribe();
//!
//! // Send an action
//! let state = store.send(Action::DoSomething).await?;
//!
//! // Every listener sees the same snapshot
//! let transition = transitions.recv().await?;
//! assert!(std::sync::Arc::ptr_eq(&state, &transition.state));
//! ```

use statecraft_core::{action::Action, reducer::Reducer};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

/// Store configuration
pub mod config;

/// Metric names for observability
pub mod metrics;

pub use config::{ConfigError, StoreConfig};

/// Error types for the Store runtime
pub mod error {
    use super::config::ConfigError;
    use thiserror::Error;

    /// Errors that can occur during Store operations
    ///
    /// Reducers themselves never fail; these errors only concern the store
    /// lifecycle and its listeners.
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after shutdown initiated.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Transition broadcast channel closed
        ///
        /// Every sender was dropped, so no further transitions will arrive.
        #[error("Transition broadcast channel closed")]
        ChannelClosed,

        /// A listener fell behind and missed transitions
        #[error("Listener lagged behind and skipped {0} transitions")]
        Lagged(u64),

        /// The store could not be built from its configuration
        #[error(transparent)]
        Config(#[from] ConfigError),
    }
}

pub use error::StoreError;

/// One applied action, as seen by listeners
///
/// `revision` counts the actions the store has applied, starting at 1 for the
/// first transition. `state` is the snapshot produced by that action; it is
/// shared, never mutated, and stays valid after later transitions.
#[derive(Debug)]
pub struct Transition<S> {
    /// Number of actions applied so far, including this one
    pub revision: u64,
    /// Kind tag of the action that produced this state
    pub action: &'static str,
    /// State after the action
    pub state: Arc<S>,
}

// Manual impl: `derive` would require `S: Clone`
impl<S> Clone for Transition<S> {
    fn clone(&self) -> Self {
        Self {
            revision: self.revision,
            action: self.action,
            state: Arc::clone(&self.state),
        }
    }
}

/// Store module - the runtime coordinator for a reducer
pub mod store {
    use super::{
        Action, Arc, AtomicBool, Mutex, Ordering, Reducer, StoreConfig, StoreError, Transition,
        metrics,
    };
    use tokio::sync::{broadcast, watch};

    struct Current<S> {
        state: Arc<S>,
        revision: u64,
    }

    struct Shared<R: Reducer> {
        reducer: R,
        current: Mutex<Current<R::State>>,
        shutdown: AtomicBool,
        transitions: broadcast::Sender<Transition<R::State>>,
        latest: watch::Sender<Arc<R::State>>,
    }

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. The latest state snapshot (replaced, never mutated)
    /// 2. The reducer (business logic)
    /// 3. A single consuming point for actions (one at a time, in arrival order)
    /// 4. Broadcasting each new state to every listener
    ///
    /// Cloning a Store yields another handle to the same state.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = Store::new(TodoReducer::new());
    ///
    /// store.send(TodoAction::AddTodo { description: "buy milk".into() }).await?;
    /// let count = store.state(|s| s.todos.len()).await;
    /// ```
    pub struct Store<R: Reducer> {
        shared: Arc<Shared<R>>,
    }

    impl<R> Store<R>
    where
        R: Reducer + Send + Sync + 'static,
        R::Action: Action + Send,
        R::State: Send + Sync + 'static,
    {
        /// Create a new store starting from the reducer's initial state
        ///
        /// Uses the default [`StoreConfig`].
        #[must_use]
        pub fn new(reducer: R) -> Self {
            let state = reducer.initial_state();
            Self::with_state(state, reducer)
        }

        /// Create a new store starting from the given state
        #[must_use]
        pub fn with_state(initial_state: R::State, reducer: R) -> Self {
            Self::build(initial_state, reducer, &StoreConfig::default())
        }

        /// Create a new store with custom configuration
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::Config`] if the configuration does not validate.
        pub fn with_config(
            initial_state: R::State,
            reducer: R,
            config: &StoreConfig,
        ) -> Result<Self, StoreError> {
            config.validate()?;
            Ok(Self::build(initial_state, reducer, config))
        }

        fn build(initial_state: R::State, reducer: R, config: &StoreConfig) -> Self {
            let state = Arc::new(initial_state);
            let (transitions, _) = broadcast::channel(config.broadcast_capacity);
            let (latest, _) = watch::channel(Arc::clone(&state));

            Self {
                shared: Arc::new(Shared {
                    reducer,
                    current: Mutex::new(Current { state, revision: 0 }),
                    shutdown: AtomicBool::new(false),
                    transitions,
                    latest,
                }),
            }
        }

        /// Send an action to the store
        ///
        /// This is the primary way to interact with the store:
        /// 1. Waits for exclusive access to the current state
        /// 2. Calls the reducer with (state, action)
        /// 3. Replaces the current snapshot and bumps the revision
        /// 4. Publishes the transition to every listener
        ///
        /// Concurrent callers are serialized; whoever acquires the store first
        /// is applied first. Listeners never observe a partial state.
        ///
        /// # Returns
        ///
        /// The snapshot produced by this action.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down,
        /// including when shutdown began while this call waited for the store.
        #[tracing::instrument(skip(self, action), fields(kind = action.kind()), name = "store_send")]
        pub async fn send(&self, action: R::Action) -> Result<Arc<R::State>, StoreError> {
            if self.shared.shutdown.load(Ordering::Acquire) {
                metrics::counter!(metrics::ACTIONS_REJECTED_TOTAL).increment(1);
                tracing::warn!("Rejecting action, store is shutting down");
                return Err(StoreError::ShutdownInProgress);
            }

            let kind = action.kind();
            let mut current = self.shared.current.lock().await;

            // Shutdown may have started while this caller was queued for the lock
            if self.shared.shutdown.load(Ordering::Acquire) {
                metrics::counter!(metrics::ACTIONS_REJECTED_TOTAL).increment(1);
                tracing::warn!("Rejecting queued action, store is shutting down");
                return Err(StoreError::ShutdownInProgress);
            }

            let start = std::time::Instant::now();
            let next = Arc::new(self.shared.reducer.reduce(&*current.state, action));
            metrics::histogram!(metrics::REDUCER_DURATION_SECONDS)
                .record(start.elapsed().as_secs_f64());
            metrics::counter!(metrics::ACTIONS_TOTAL, "kind" => kind).increment(1);

            current.state = Arc::clone(&next);
            current.revision += 1;
            let revision = current.revision;

            // Publish while still holding the lock so listeners see revisions in order
            let delivered = self
                .shared
                .transitions
                .send(Transition {
                    revision,
                    action: kind,
                    state: Arc::clone(&next),
                })
                .unwrap_or(0);
            self.shared.latest.send_replace(Arc::clone(&next));
            drop(current);

            tracing::debug!(revision, delivered, "Transition applied");
            Ok(next)
        }

        /// Send a sequence of actions in order
        ///
        /// Stops at the first error. An empty sequence returns the current snapshot.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store shuts down
        /// before every action was applied.
        pub async fn send_all<I>(&self, actions: I) -> Result<Arc<R::State>, StoreError>
        where
            I: IntoIterator<Item = R::Action>,
        {
            let mut last = None;
            for action in actions {
                last = Some(self.send(action).await?);
            }
            match last {
                Some(state) => Ok(state),
                None => Ok(self.snapshot().await),
            }
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let todo_count = store.state(|s| s.todos.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&R::State) -> T,
        {
            let current = self.shared.current.lock().await;
            f(&*current.state)
        }

        /// The current state snapshot
        pub async fn snapshot(&self) -> Arc<R::State> {
            Arc::clone(&self.shared.current.lock().await.state)
        }

        /// Number of actions applied so far
        pub async fn revision(&self) -> u64 {
            self.shared.current.lock().await.revision
        }

        /// Subscribe to every future transition
        ///
        /// Each receiver gets every transition in revision order. A receiver
        /// that falls more than the configured capacity behind reports
        /// `RecvError::Lagged` and resumes from the oldest retained transition.
        #[must_use]
        pub fn subscribe(&self) -> broadcast::Receiver<Transition<R::State>> {
            let rx = self.shared.transitions.subscribe();
            self.record_subscribers();
            tracing::debug!(
                subscribers = self.shared.transitions.receiver_count(),
                "Listener subscribed"
            );
            rx
        }

        /// Watch the latest state
        ///
        /// Unlike [`subscribe`](Self::subscribe) this never lags: it only ever
        /// holds the most recent snapshot.
        #[must_use]
        pub fn watch(&self) -> watch::Receiver<Arc<R::State>> {
            self.shared.latest.subscribe()
        }

        /// Number of live transition listeners
        #[must_use]
        pub fn subscriber_count(&self) -> usize {
            self.shared.transitions.receiver_count()
        }

        /// Stop accepting actions
        ///
        /// Actions already applied stay applied; listeners keep the transitions
        /// they have not read yet. Calling this more than once has no further effect.
        pub fn shutdown(&self) {
            if !self.shared.shutdown.swap(true, Ordering::AcqRel) {
                tracing::info!("Store shutting down");
            }
        }

        /// Whether [`shutdown`](Self::shutdown) was called
        #[must_use]
        pub fn is_shutdown(&self) -> bool {
            self.shared.shutdown.load(Ordering::Acquire)
        }

        /// Access the reducer driving this store
        #[must_use]
        pub fn reducer(&self) -> &R {
            &self.shared.reducer
        }

        // Precision loss acceptable for a gauge
        #[allow(clippy::cast_precision_loss)]
        fn record_subscribers(&self) {
            metrics::gauge!(metrics::SUBSCRIBERS)
                .set(self.shared.transitions.receiver_count() as f64);
        }
    }

    impl<R: Reducer> Clone for Store<R> {
        fn clone(&self) -> Self {
            Self {
                shared: Arc::clone(&self.shared),
            }
        }
    }
}

pub use store::Store;

//! # Statecraft Core
//!
//! Core traits for the Statecraft reducer architecture.
//!
//! A feature is described by three things:
//!
//! - **State**: an owned, immutable value describing the feature at one point in time
//! - **Action**: a closed enum of everything that can happen to that state
//! - **Reducer**: a pure, total function `(&State, Action) → State`
//!
//! Reducers never mutate the previous state and never fail. Every action has a
//! defined outcome, so an action log can always be replayed into the same state.
//!
//! ## Example
//!
//! ```
//! use statecraft_core::action::Action;
//! use statecraft_core::reducer::{replay, Reducer};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct CounterState {
//!     count: i64,
//! }
//!
//! enum CounterAction {
//!     Increment,
//!     Reset,
//! }
//!
//! impl Action for CounterAction {
//!     fn kind(&self) -> &'static str {
//!         match self {
//!             Self::Increment => "INCREMENT",
//!             Self::Reset => "RESET",
//!         }
//!     }
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!
//!     fn initial_state(&self) -> CounterState {
//!         CounterState { count: 0 }
//!     }
//!
//!     fn reduce(&self, state: &CounterState, action: CounterAction) -> CounterState {
//!         match action {
//!             CounterAction::Increment => CounterState { count: state.count + 1 },
//!             CounterAction::Reset => self.initial_state(),
//!         }
//!     }
//! }
//!
//! let state = replay(&CounterReducer, [CounterAction::Increment, CounterAction::Increment]);
//! assert_eq!(state.count, 2);
//! ```

/// Action module - the input type of a reducer
///
/// Actions are closed enums with one variant per kind, each carrying only the
/// payload that kind needs. The [`Action`](action::Action) trait gives every
/// action a stable, human-readable kind tag used for logging and metrics.
pub mod action {
    /// Common behaviour of reducer inputs
    pub trait Action {
        /// Stable tag naming the kind of this action (e.g. `"ADD_TODO"`)
        fn kind(&self) -> &'static str;
    }
}

/// Reducer module - the core trait for business logic
///
/// Reducers are pure functions: `(State, Action) → State`.
///
/// They contain all business logic and are deterministic and testable. Any
/// state they need to stay deterministic (counters, sequence numbers) lives in
/// the state value itself, never in process-wide statics.
pub mod reducer {
    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer produces
    /// - `Action`: The action type this reducer processes
    ///
    /// # Contract
    ///
    /// - `reduce` is total: it must return a state for every input and must not panic
    /// - `reduce` does not mutate its input; it derives a new value from it
    /// - Inputs that do not apply (unknown kinds, missing ids) yield the state unchanged
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The state a feature starts from before any action was applied
        fn initial_state(&self) -> Self::State;

        /// Derive the next state from the current one and an action
        fn reduce(&self, state: &Self::State, action: Self::Action) -> Self::State;

        /// Reduce an action into a possibly absent state
        ///
        /// An absent state is replaced by [`initial_state`](Reducer::initial_state)
        /// before the action is applied, so the first call of a process needs no
        /// separate initialization step.
        fn reduce_optional(
            &self,
            state: Option<&Self::State>,
            action: Self::Action,
        ) -> Self::State {
            match state {
                Some(state) => self.reduce(state, action),
                None => self.reduce(&self.initial_state(), action),
            }
        }
    }

    /// Replay an action log from the reducer's initial state
    pub fn replay<R, I>(reducer: &R, actions: I) -> R::State
    where
        R: Reducer + ?Sized,
        I: IntoIterator<Item = R::Action>,
    {
        replay_from(reducer, reducer.initial_state(), actions)
    }

    /// Replay an action log on top of an existing state
    pub fn replay_from<R, I>(reducer: &R, state: R::State, actions: I) -> R::State
    where
        R: Reducer + ?Sized,
        I: IntoIterator<Item = R::Action>,
    {
        actions
            .into_iter()
            .fold(state, |state, action| reducer.reduce(&state, action))
    }
}

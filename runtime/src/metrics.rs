//! Metric names and descriptions for the Store runtime.
//!
//! The store records through the [`metrics`] facade only. Installing a
//! recorder/exporter is left to the embedding application; without one,
//! every call below is a no-op.
//!
//! # Example
//!
//! ```rust
//! use statecraft_runtime::metrics::register_metrics;
//!
//! // Once, after installing a recorder
//! register_metrics();
//! ```

use metrics::{describe_counter, describe_gauge, describe_histogram, Unit};

// Re-export metrics macros for use in other modules
pub use metrics::{counter, gauge, histogram};

/// Actions applied by a store, labelled by action kind
pub const ACTIONS_TOTAL: &str = "store.actions.total";

/// Actions refused because the store was shutting down
pub const ACTIONS_REJECTED_TOTAL: &str = "store.actions.rejected_total";

/// Reducer execution time
pub const REDUCER_DURATION_SECONDS: &str = "store.reducer.duration_seconds";

/// Listeners currently subscribed to transitions
pub const SUBSCRIBERS: &str = "store.subscribers";

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        ACTIONS_TOTAL,
        Unit::Count,
        "Total number of actions applied by the store"
    );
    describe_counter!(
        ACTIONS_REJECTED_TOTAL,
        Unit::Count,
        "Total number of actions refused during shutdown"
    );
    describe_histogram!(
        REDUCER_DURATION_SECONDS,
        Unit::Seconds,
        "Time taken to reduce one action"
    );
    describe_gauge!(
        SUBSCRIBERS,
        Unit::Count,
        "Number of listeners subscribed to state transitions"
    );
}

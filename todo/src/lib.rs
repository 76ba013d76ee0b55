//! Todo list state machine with real-time state broadcast.
//!
//! The list is driven entirely by [`TodoAction`]s folded through a pure
//! [`TodoReducer`]. A [`TodoService`] runs the reducer inside a
//! `statecraft_runtime::Store`, which applies actions one at a time and
//! broadcasts every resulting [`TodoState`] to its listeners.
//!
//! - Add, delete and toggle todos; pick a filter (`ALL`, `ACTIVE`, `COMPLETE`)
//! - Ids come from a counter inside the state, so replaying a log is deterministic
//! - Unknown action kinds and missing ids are no-ops
//! - JSON boundary compatible with the browser client's action shapes
//!
//! # Quick Start
//!
//! ```no_run
//! use todo::{Filter, TodoId, TodoService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = TodoService::new();
//! let mut changes = service.state_changed();
//!
//! service.add_todo("Buy milk").await?;
//! service.toggle_todo(TodoId::new(1)).await?;
//! service.filter_todos(Filter::Active).await?;
//!
//! // Listeners see each transition in order
//! let first = changes.recv().await?;
//! assert_eq!(first.revision, 1);
//!
//! assert!(service.visible_todos().await.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod reducer;
pub mod service;
pub mod types;
pub mod view;
pub mod wire;

// Re-export commonly used types
pub use reducer::TodoReducer;
pub use service::TodoService;
pub use types::{Filter, Todo, TodoAction, TodoId, TodoState, UnknownFilter};
pub use view::{TodoView, visible_todos};
pub use wire::WireError;

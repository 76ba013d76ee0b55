//! Application-facing facade over a todo [`Store`].

use crate::reducer::TodoReducer;
use crate::types::{Filter, Todo, TodoAction, TodoId, TodoState};
use crate::view;
use statecraft_runtime::{Store, StoreConfig, StoreError, Transition};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Todo list operations backed by a shared store
///
/// Clones share the same store, so any number of handlers can dispatch into
/// one list while listeners observe every change through
/// [`state_changed`](Self::state_changed).
#[derive(Clone)]
pub struct TodoService {
    store: Store<TodoReducer>,
}

impl TodoService {
    /// Creates a service over an empty todo list
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Store::new(TodoReducer::new()),
        }
    }

    /// Creates a service over an empty todo list with custom store configuration
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the configuration is invalid.
    pub fn with_config(config: &StoreConfig) -> Result<Self, StoreError> {
        Ok(Self {
            store: Store::with_config(TodoState::new(), TodoReducer::new(), config)?,
        })
    }

    /// Wraps an existing store
    #[must_use]
    pub const fn from_store(store: Store<TodoReducer>) -> Self {
        Self { store }
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &Store<TodoReducer> {
        &self.store
    }

    /// Apply any action
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn dispatch(&self, action: TodoAction) -> Result<Arc<TodoState>, StoreError> {
        self.store.send(action).await
    }

    /// Add a todo
    ///
    /// If the list is showing only complete todos, switches the filter to
    /// `Active` so the new todo is visible.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn add_todo(
        &self,
        description: impl Into<String>,
    ) -> Result<Arc<TodoState>, StoreError> {
        let state = self.dispatch(TodoAction::add(description)).await?;
        if state.filter == Filter::Complete {
            tracing::debug!("New todo hidden by COMPLETE filter, switching to ACTIVE");
            return self.filter_todos(Filter::Active).await;
        }
        Ok(state)
    }

    /// Delete a todo
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn delete_todo(&self, id: TodoId) -> Result<Arc<TodoState>, StoreError> {
        self.dispatch(TodoAction::delete(id)).await
    }

    /// Toggle a todo between done and not done
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn toggle_todo(&self, id: TodoId) -> Result<Arc<TodoState>, StoreError> {
        self.dispatch(TodoAction::toggle(id)).await
    }

    /// Select which todos are visible
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn filter_todos(&self, filter: Filter) -> Result<Arc<TodoState>, StoreError> {
        self.dispatch(TodoAction::filter(filter)).await
    }

    /// Current state snapshot
    pub async fn state(&self) -> Arc<TodoState> {
        self.store.snapshot().await
    }

    /// Todos visible under the current filter
    pub async fn visible_todos(&self) -> Vec<Todo> {
        self.store
            .state(|state| view::visible_todos(state).into_iter().cloned().collect())
            .await
    }

    /// Subscribe to every state change
    #[must_use]
    pub fn state_changed(&self) -> broadcast::Receiver<Transition<TodoState>> {
        self.store.subscribe()
    }
}

impl Default for TodoService {
    fn default() -> Self {
        Self::new()
    }
}

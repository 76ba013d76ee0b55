//! Reducer logic for the todo list.
//!
//! The reducer is total: ids that match no todo and action kinds it does not
//! know leave the state as it was, so any recorded action log can be replayed.

use crate::types::{Filter, Todo, TodoAction, TodoId, TodoState};
use statecraft_core::reducer::Reducer;

/// Reducer for the todo list
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn add_todo(state: &TodoState, description: String) -> TodoState {
        let id = state.next_id;
        // The last id is never issued: it would leave no id for the counter
        let Some(next_id) = id.next() else {
            tracing::warn!(%id, "Todo ids exhausted, ignoring add");
            return state.clone();
        };
        let mut todos = Vec::with_capacity(state.todos.len() + 1);
        todos.extend_from_slice(&state.todos);
        todos.push(Todo::new(id, description));

        TodoState {
            todos,
            filter: state.filter,
            next_id,
        }
    }

    fn delete_todo(state: &TodoState, id: TodoId) -> TodoState {
        tracing::debug!(%id, "Deleting todo");

        TodoState {
            todos: state
                .todos
                .iter()
                .filter(|todo| todo.id != id)
                .cloned()
                .collect(),
            ..state.clone()
        }
    }

    fn toggle_todo(state: &TodoState, id: TodoId) -> TodoState {
        TodoState {
            todos: state
                .todos
                .iter()
                .map(|todo| if todo.id == id { todo.toggled() } else { todo.clone() })
                .collect(),
            ..state.clone()
        }
    }

    fn filter_todos(state: &TodoState, filter: Filter) -> TodoState {
        TodoState {
            filter,
            ..state.clone()
        }
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;

    fn initial_state(&self) -> TodoState {
        TodoState::new()
    }

    fn reduce(&self, state: &TodoState, action: TodoAction) -> TodoState {
        match action {
            TodoAction::AddTodo { description } => Self::add_todo(state, description),
            TodoAction::DeleteTodo { id } => Self::delete_todo(state, id),
            TodoAction::ToggleTodo { id } => Self::toggle_todo(state, id),
            TodoAction::FilterTodos { filter } => Self::filter_todos(state, filter),
            TodoAction::Unknown => state.clone(),
        }
    }
}

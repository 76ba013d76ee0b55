//! Read-only projections of a [`TodoState`] for display.
//!
//! Nothing here is stored; views borrow from the state they were built from
//! and are recomputed after every transition.

use crate::types::{Filter, Todo, TodoState};
use serde::Serialize;

/// Todos of `todos` visible under `filter`, in order
pub fn filter_todos(todos: &[Todo], filter: Filter) -> impl Iterator<Item = &Todo> {
    todos.iter().filter(move |todo| filter.matches(todo))
}

/// Todos visible under the state's current filter, in order
#[must_use]
pub fn visible_todos(state: &TodoState) -> Vec<&Todo> {
    filter_todos(&state.todos, state.filter).collect()
}

/// CSS class for a todo row
#[must_use]
pub const fn todo_class(todo: &Todo) -> &'static str {
    if todo.done { "completed" } else { "active" }
}

/// CSS class for a filter button given the selected filter
#[must_use]
pub fn filter_class(state: &TodoState, button: Filter) -> &'static str {
    if state.filter == button {
        "active"
    } else {
        "inactive"
    }
}

/// Everything a client needs to render the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoView<'a> {
    /// Selected filter
    #[serde(rename = "filterName")]
    pub filter: Filter,
    /// Visible todos, in order
    pub visible: Vec<&'a Todo>,
    /// Todos not done yet, regardless of filter
    pub active_count: usize,
    /// Todos done, regardless of filter
    pub completed_count: usize,
}

impl<'a> TodoView<'a> {
    /// Project a state
    #[must_use]
    pub fn new(state: &'a TodoState) -> Self {
        Self {
            filter: state.filter,
            visible: visible_todos(state),
            active_count: state.active_count(),
            completed_count: state.completed_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::TodoReducer;
    use crate::types::{TodoAction, TodoId};
    use statecraft_core::reducer::replay;

    fn sample() -> TodoState {
        replay(
            &TodoReducer::new(),
            [
                TodoAction::add("a"),
                TodoAction::add("b"),
                TodoAction::add("c"),
                TodoAction::toggle(TodoId::new(2)),
            ],
        )
    }

    fn ids<'a>(todos: impl IntoIterator<Item = &'a Todo>) -> Vec<u64> {
        todos.into_iter().map(|t| t.id.get()).collect()
    }

    #[test]
    fn all_shows_everything_in_order() {
        let state = sample();
        assert_eq!(ids(visible_todos(&state)), vec![1, 2, 3]);
    }

    #[test]
    fn active_and_complete_partition() {
        let state = sample();
        assert_eq!(ids(filter_todos(&state.todos, Filter::Active)), vec![1, 3]);
        assert_eq!(ids(filter_todos(&state.todos, Filter::Complete)), vec![2]);
    }

    #[test]
    fn visible_follows_selected_filter() {
        let state = TodoState {
            filter: Filter::Complete,
            ..sample()
        };
        assert_eq!(ids(visible_todos(&state)), vec![2]);
    }

    #[test]
    fn css_classes() {
        let state = sample();
        assert_eq!(todo_class(&state.todos[0]), "active");
        assert_eq!(todo_class(&state.todos[1]), "completed");
        assert_eq!(filter_class(&state, Filter::All), "active");
        assert_eq!(filter_class(&state, Filter::Active), "inactive");
    }

    #[test]
    fn view_counts_ignore_filter() {
        let state = TodoState {
            filter: Filter::Active,
            ..sample()
        };
        let view = TodoView::new(&state);
        assert_eq!(view.visible.len(), 2);
        assert_eq!(view.active_count, 2);
        assert_eq!(view.completed_count, 1);
    }
}

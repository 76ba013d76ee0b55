//! Domain types for the todo list.
//!
//! A todo list is an ordered sequence of todo items plus the filter currently
//! selected for display. Ids come from a counter carried inside the state, so
//! the same action log always produces the same ids.

use serde::{Deserialize, Serialize};
use statecraft_core::action::Action;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unique identifier for a todo item
///
/// Ids are positive, handed out in increasing order starting at 1, and never
/// reused within one state history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// The id given to the first todo ever added
    pub const FIRST: Self = Self(1);

    /// Creates a `TodoId` from a raw number
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw number
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The id following this one, or `None` once the id space is exhausted
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,
    /// What needs doing
    pub description: String,
    /// Whether the todo is done
    pub done: bool,
}

impl Todo {
    /// Creates a new, not yet done, todo item
    #[must_use]
    pub fn new(id: TodoId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            done: false,
        }
    }

    /// A copy of this todo with `done` flipped
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            done: !self.done,
            ..self.clone()
        }
    }
}

/// Which todos are visible
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Filter {
    /// Every todo
    #[default]
    All,
    /// Todos not done yet
    Active,
    /// Todos already done
    Complete,
}

impl Filter {
    /// Every filter, in display order
    pub const VALUES: [Self; 3] = [Self::All, Self::Active, Self::Complete];

    /// Wire name of the filter
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Active => "ACTIVE",
            Self::Complete => "COMPLETE",
        }
    }

    /// Whether `todo` is visible under this filter
    #[must_use]
    pub const fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Active => !todo.done,
            Self::Complete => todo.done,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A filter name outside `ALL`, `ACTIVE` and `COMPLETE`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown filter name: {0:?}")]
pub struct UnknownFilter(pub String);

impl FromStr for Filter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::VALUES
            .into_iter()
            .find(|filter| filter.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownFilter(s.to_string()))
    }
}

/// State of the todo list
///
/// Every action yields a new `TodoState`; existing values are never modified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoState {
    /// Todos in insertion order
    pub todos: Vec<Todo>,
    /// Filter selected for display
    #[serde(rename = "filterName")]
    pub filter: Filter,
    /// Id the next added todo will receive
    pub next_id: TodoId,
}

impl TodoState {
    /// Creates the initial state: no todos, filter `All`, next id 1
    #[must_use]
    pub const fn new() -> Self {
        Self {
            todos: Vec::new(),
            filter: Filter::All,
            next_id: TodoId::FIRST,
        }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns the number of done todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.done).count()
    }

    /// Returns the number of todos not done yet
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.count() - self.completed_count()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn exists(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }
}

impl Default for TodoState {
    fn default() -> Self {
        Self::new()
    }
}

/// Actions that can be applied to a todo list
///
/// Serialized with a `type` tag matching the browser client's action names,
/// e.g. `{"type":"TOGGLE_TODO","id":3}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoAction {
    /// Append a new todo
    AddTodo {
        /// What needs doing
        description: String,
    },

    /// Remove a todo
    DeleteTodo {
        /// Todo to remove
        id: TodoId,
    },

    /// Flip a todo between done and not done
    ToggleTodo {
        /// Todo to flip
        id: TodoId,
    },

    /// Select which todos are visible
    FilterTodos {
        /// Filter to select
        #[serde(rename = "filterName")]
        filter: Filter,
    },

    /// An action kind this version does not know; leaves state unchanged
    #[serde(other)]
    Unknown,
}

impl TodoAction {
    /// `AddTodo` shorthand
    #[must_use]
    pub fn add(description: impl Into<String>) -> Self {
        Self::AddTodo {
            description: description.into(),
        }
    }

    /// `DeleteTodo` shorthand
    #[must_use]
    pub const fn delete(id: TodoId) -> Self {
        Self::DeleteTodo { id }
    }

    /// `ToggleTodo` shorthand
    #[must_use]
    pub const fn toggle(id: TodoId) -> Self {
        Self::ToggleTodo { id }
    }

    /// `FilterTodos` shorthand
    #[must_use]
    pub const fn filter(filter: Filter) -> Self {
        Self::FilterTodos { filter }
    }
}

impl Action for TodoAction {
    fn kind(&self) -> &'static str {
        match self {
            Self::AddTodo { .. } => "ADD_TODO",
            Self::DeleteTodo { .. } => "DELETE_TODO",
            Self::ToggleTodo { .. } => "TOGGLE_TODO",
            Self::FilterTodos { .. } => "FILTER_TODOS",
            Self::Unknown => "UNKNOWN",
        }
    }
}

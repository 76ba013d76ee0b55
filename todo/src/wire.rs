//! JSON boundary for actions and states.
//!
//! Actions use the browser client's shape, tagged by `type`:
//!
//! ```json
//! {"type":"ADD_TODO","description":"buy milk"}
//! {"type":"DELETE_TODO","id":1}
//! {"type":"TOGGLE_TODO","id":1}
//! {"type":"FILTER_TODOS","filterName":"ACTIVE"}
//! ```
//!
//! An unrecognized `type` decodes to [`TodoAction::Unknown`], which the reducer
//! ignores. An unrecognized `filterName` is rejected here, before it can reach
//! the state. Action logs are newline-delimited JSON.

use crate::types::{TodoAction, TodoState};
use std::collections::HashSet;
use std::io::BufRead;
use thiserror::Error;

/// Errors at the JSON boundary
#[derive(Error, Debug)]
pub enum WireError {
    /// Malformed JSON or a value of the wrong shape
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A line of an action log failed to decode
    #[error("Line {line}: {source}")]
    Line {
        /// 1-based line number
        line: usize,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// A decoded state breaks a todo list invariant
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Reading an action log failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Decode one action
///
/// # Errors
///
/// Returns [`WireError::Json`] for malformed JSON, a missing or non-string
/// `type`, missing payload fields, or an unknown filter name.
pub fn decode_action(json: &str) -> Result<TodoAction, WireError> {
    Ok(serde_json::from_str(json)?)
}

/// Encode one action
///
/// # Errors
///
/// Returns [`WireError::Json`] if serialization fails.
pub fn encode_action(action: &TodoAction) -> Result<String, WireError> {
    Ok(serde_json::to_string(action)?)
}

/// Decode a newline-delimited action log
///
/// Blank lines are skipped.
///
/// # Errors
///
/// - [`WireError::Line`] naming the first line that fails to decode
/// - [`WireError::Io`] if reading fails
pub fn decode_action_log<R: BufRead>(reader: R) -> Result<Vec<TodoAction>, WireError> {
    let mut actions = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let action = serde_json::from_str(&line).map_err(|source| WireError::Line {
            line: index + 1,
            source,
        })?;
        actions.push(action);
    }
    tracing::debug!(count = actions.len(), "Decoded action log");
    Ok(actions)
}

/// Encode actions as a newline-delimited log
///
/// # Errors
///
/// Returns [`WireError::Json`] if serialization fails.
pub fn encode_action_log<'a, I>(actions: I) -> Result<String, WireError>
where
    I: IntoIterator<Item = &'a TodoAction>,
{
    let mut log = String::new();
    for action in actions {
        log.push_str(&encode_action(action)?);
        log.push('\n');
    }
    Ok(log)
}

/// Decode a state and check its invariants
///
/// # Errors
///
/// - [`WireError::Json`] for malformed JSON
/// - [`WireError::InvalidState`] if two todos share an id, `nextId` is not
///   above every todo id, or `nextId` is the largest possible id
pub fn decode_state(json: &str) -> Result<TodoState, WireError> {
    let state: TodoState = serde_json::from_str(json)?;
    validate_state(&state)?;
    Ok(state)
}

/// Encode a state
///
/// # Errors
///
/// Returns [`WireError::Json`] if serialization fails.
pub fn encode_state(state: &TodoState) -> Result<String, WireError> {
    Ok(serde_json::to_string(state)?)
}

fn validate_state(state: &TodoState) -> Result<(), WireError> {
    if state.next_id.next().is_none() {
        return Err(WireError::InvalidState(format!(
            "nextId {} leaves no room for new todos",
            state.next_id
        )));
    }
    let mut seen = HashSet::with_capacity(state.todos.len());
    for todo in &state.todos {
        if todo.id.get() == 0 {
            return Err(WireError::InvalidState("todo id 0 is not allowed".to_string()));
        }
        if !seen.insert(todo.id) {
            return Err(WireError::InvalidState(format!("duplicate todo id {}", todo.id)));
        }
        if todo.id >= state.next_id {
            return Err(WireError::InvalidState(format!(
                "todo id {} is not below nextId {}",
                todo.id, state.next_id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::types::{Filter, Todo, TodoId};

    #[test]
    fn decodes_client_actions() {
        assert_eq!(
            decode_action(r#"{"type":"ADD_TODO","description":"buy milk"}"#).unwrap(),
            TodoAction::add("buy milk")
        );
        assert_eq!(
            decode_action(r#"{"type":"DELETE_TODO","id":1}"#).unwrap(),
            TodoAction::delete(TodoId::new(1))
        );
        assert_eq!(
            decode_action(r#"{"type":"TOGGLE_TODO","id":2}"#).unwrap(),
            TodoAction::toggle(TodoId::new(2))
        );
        assert_eq!(
            decode_action(r#"{"type":"FILTER_TODOS","filterName":"ACTIVE"}"#).unwrap(),
            TodoAction::filter(Filter::Active)
        );
    }

    #[test]
    fn unknown_type_decodes_to_unknown() {
        assert_eq!(
            decode_action(r#"{"type":"CLEAR_COMPLETED"}"#).unwrap(),
            TodoAction::Unknown
        );
    }

    #[test]
    fn unknown_filter_name_is_rejected() {
        let err = decode_action(r#"{"type":"FILTER_TODOS","filterName":"DONE"}"#).unwrap_err();
        assert!(matches!(err, WireError::Json(_)));
    }

    #[test]
    fn missing_fields_are_rejected() {
        assert!(decode_action(r#"{"type":"ADD_TODO"}"#).is_err());
        assert!(decode_action(r#"{"description":"no type"}"#).is_err());
        assert!(decode_action(r#"{"type":"DELETE_TODO","id":-1}"#).is_err());
        assert!(decode_action("not json").is_err());
    }

    #[test]
    fn encoded_action_uses_client_shape() {
        let json = encode_action(&TodoAction::filter(Filter::Complete)).unwrap();
        assert_eq!(json, r#"{"type":"FILTER_TODOS","filterName":"COMPLETE"}"#);
    }

    #[test]
    fn action_log_skips_blank_lines() {
        let log = "{\"type\":\"ADD_TODO\",\"description\":\"a\"}\n\n  \n{\"type\":\"TOGGLE_TODO\",\"id\":1}\n";
        let actions = decode_action_log(log.as_bytes()).unwrap();
        assert_eq!(
            actions,
            vec![TodoAction::add("a"), TodoAction::toggle(TodoId::new(1))]
        );
    }

    #[test]
    fn action_log_reports_line_number() {
        let log = "{\"type\":\"ADD_TODO\",\"description\":\"a\"}\n\n{\"type\":\"ADD_TODO\"}\n";
        let err = decode_action_log(log.as_bytes()).unwrap_err();
        assert!(matches!(err, WireError::Line { line: 3, .. }));
    }

    #[test]
    fn action_log_encodes_one_action_per_line() {
        let actions = vec![TodoAction::add("a"), TodoAction::delete(TodoId::new(1))];
        let log = encode_action_log(&actions).unwrap();
        assert_eq!(log.lines().count(), 2);
        assert_eq!(decode_action_log(log.as_bytes()).unwrap(), actions);
    }

    #[test]
    fn state_shape() {
        let state = TodoState {
            todos: vec![Todo::new(TodoId::new(1), "buy milk")],
            filter: Filter::All,
            next_id: TodoId::new(2),
        };
        assert_eq!(
            encode_state(&state).unwrap(),
            r#"{"todos":[{"id":1,"description":"buy milk","done":false}],"filterName":"ALL","nextId":2}"#
        );
    }

    #[test]
    fn decode_state_checks_invariants() {
        let duplicate = r#"{"todos":[{"id":1,"description":"a","done":false},{"id":1,"description":"b","done":true}],"filterName":"ALL","nextId":3}"#;
        assert!(matches!(
            decode_state(duplicate),
            Err(WireError::InvalidState(_))
        ));

        let stale_counter = r#"{"todos":[{"id":4,"description":"a","done":false}],"filterName":"ACTIVE","nextId":2}"#;
        assert!(matches!(
            decode_state(stale_counter),
            Err(WireError::InvalidState(_))
        ));

        let valid = r#"{"todos":[{"id":4,"description":"a","done":false}],"filterName":"ACTIVE","nextId":5}"#;
        let state = decode_state(valid).unwrap();
        assert_eq!(state.filter, Filter::Active);
        assert_eq!(state.next_id, TodoId::new(5));
    }

    #[test]
    fn exhausted_counter_is_rejected() {
        let json = format!(r#"{{"todos":[],"filterName":"ALL","nextId":{}}}"#, u64::MAX);
        assert!(matches!(decode_state(&json), Err(WireError::InvalidState(_))));

        let json = format!(r#"{{"todos":[],"filterName":"ALL","nextId":{}}}"#, u64::MAX - 1);
        let state = decode_state(&json).unwrap();
        assert_eq!(state.next_id, TodoId::new(u64::MAX - 1));
    }
}

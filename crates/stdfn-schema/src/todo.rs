//! # Todo Schema
//!
//! The task-creation schema used by the `stdfn todo` command and the
//! integration tests:
//!
//! | field         | rule                                   | default |
//! |---------------|----------------------------------------|---------|
//! | `taskName`    | string, at least one character         | —       |
//! | `completed`   | boolean                                | `false` |
//! | `description` | string or `null`                       | `null`  |

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::typed::Typed;
use crate::value::{boolean, object, string, ValueSchema};

/// Message reported for an empty task name.
pub const TASK_NAME_REQUIRED: &str = "Task name is required";

/// A validated task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Non-empty task name.
    pub task_name: String,
    /// Whether the task is done.
    pub completed: bool,
    /// Optional free text.
    pub description: Option<String>,
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Created task: {}, Completed: {}, Description: {}",
            self.task_name,
            self.completed,
            self.description.as_deref().unwrap_or("null")
        )
    }
}

/// The todo schema over raw JSON values.
pub fn todo_value_schema() -> ValueSchema {
    object([
        ("taskName", string().min_length(1, TASK_NAME_REQUIRED)),
        ("completed", boolean().optional(Value::Bool(false))),
        ("description", string().nullable().optional(Value::Null)),
    ])
}

/// The todo schema producing a [`Todo`].
pub fn todo_schema() -> Typed<ValueSchema, Todo> {
    todo_value_schema().typed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_created_line() {
        let todo = Todo {
            task_name: "Task A".into(),
            completed: false,
            description: None,
        };
        assert_eq!(
            todo.to_string(),
            "Created task: Task A, Completed: false, Description: null"
        );
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let todo = Todo {
            task_name: "Task A".into(),
            completed: true,
            description: Some("d".into()),
        };
        assert_eq!(
            serde_json::to_value(&todo).unwrap(),
            serde_json::json!({"taskName": "Task A", "completed": true, "description": "d"})
        );
    }
}

//! # Todo Subcommand
//!
//! Creates a task through a validated function over the todo schema.
//! Only the fields given on the command line are sent, so omitted fields
//! take the schema's defaults.

use anyhow::Context;
use clap::Args;
use serde_json::{Map, Value};
use stdfn_core::{make_function, CallError};
use stdfn_schema::{todo_schema, Todo};

use crate::report::{render_failure, OutputFormat};

/// Arguments for the todo subcommand.
#[derive(Args, Debug, Default)]
pub struct TodoArgs {
    /// Raw task object as JSON. Replaces the individual field flags.
    #[arg(long, conflicts_with_all = ["task_name", "completed", "description"])]
    pub json: Option<String>,

    /// Task name.
    #[arg(long)]
    pub task_name: Option<String>,

    /// Mark the task as completed.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub completed: Option<bool>,

    /// Task description.
    #[arg(long)]
    pub description: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,
}

impl TodoArgs {
    /// The raw, unvalidated task object these arguments describe.
    pub fn raw_input(&self) -> anyhow::Result<Value> {
        if let Some(json) = &self.json {
            return serde_json::from_str(json).context("parsing --json");
        }

        let mut task = Map::new();
        if let Some(name) = &self.task_name {
            task.insert("taskName".into(), Value::String(name.clone()));
        }
        if let Some(completed) = self.completed {
            task.insert("completed".into(), Value::Bool(completed));
        }
        if let Some(description) = &self.description {
            task.insert("description".into(), Value::String(description.clone()));
        }
        Ok(Value::Object(task))
    }
}

/// Create a task from `input`.
pub fn create_todo(input: Value) -> Result<Todo, CallError> {
    let make_todo = make_function(todo_schema(), |task: Todo| {
        tracing::debug!(task_name = %task.task_name, "creating task");
        task
    });
    make_todo.call(input)
}

/// Run the todo subcommand.
pub fn run(args: &TodoArgs) -> anyhow::Result<()> {
    match create_todo(args.raw_input()?) {
        Ok(todo) => {
            match args.format {
                OutputFormat::Pretty => println!("{todo}"),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&todo)?),
            }
            Ok(())
        }
        Err(err) => {
            tracing::warn!(kind = %err.kind(), "task rejected");
            println!("{}", render_failure(&err, args.format));
            Err(err.into())
        }
    }
}

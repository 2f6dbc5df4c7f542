//! Error type shared by the parser, the task list and the session.
//!
//! Every failure a command can hit is a variant here. The read loop prints
//! the `Display` text and carries on with the next line.

use std::path::PathBuf;

use thiserror::Error;

use crate::fields::Action;

/// Errors raised while parsing or executing a command.
#[derive(Error, Debug)]
pub enum TaskError {
    // =========================================================================
    // Parsing
    // =========================================================================
    /// The first word of the input is not a known keyword.
    #[error("I'm sorry, but I don't know what '{keyword}' means.\nType [help] to see what I can do.")]
    InvalidAction { keyword: String },

    /// A required argument was left out.
    #[error("The command [{action}] is missing an argument.\nFormat: {}", .action.format())]
    MissingArgument { action: Action },

    /// An argument is present but fails validation.
    #[error("Invalid argument for [{action}]: {reason}\nFormat: {}", .action.format())]
    InvalidArgument { action: Action, reason: String },

    // =========================================================================
    // Task list
    // =========================================================================
    /// A task ID outside `[1, size]`.
    #[error("Task {id} does not exist. There are {size} tasks in the list.")]
    IndexOutOfRange { id: i64, size: usize },

    /// A description that is empty or contains the reserved separator.
    #[error("Invalid task description '{description}': it must be one non-empty line without '}}'.")]
    InvalidDescription { description: String },

    /// An identical task is already in the list.
    #[error("The task has already been added into the list.\nHere are the task details: {task}")]
    DuplicateTask { task: String },

    /// Undo with no history left.
    #[error("No more command can be undone.")]
    UndoUnavailable,

    // =========================================================================
    // Persistence
    // =========================================================================
    /// A task file line that cannot be decoded.
    #[error("Malformed task file at line {line} ({reason}): '{content}'")]
    MalformedLine {
        line: usize,
        content: String,
        reason: String,
    },

    /// The task file could not be read or written.
    #[error("Could not access task file {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TaskError {
    /// Shorthand for an [`TaskError::InvalidArgument`].
    pub fn invalid_argument(action: Action, reason: impl Into<String>) -> Self {
        TaskError::InvalidArgument {
            action,
            reason: reason.into(),
        }
    }

    /// Whether the error came from the task file rather than from user input.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            TaskError::MalformedLine { .. } | TaskError::Storage { .. }
        )
    }
}

//! Undo history: a stack of task list snapshots.

use crate::db::TaskList;
use crate::error::TaskError;

/// Snapshots taken before each successful mutating command, newest on top.
#[derive(Debug, Default)]
pub struct History {
    snapshots: Vec<TaskList>,
}

impl History {
    pub fn push(&mut self, snapshot: TaskList) {
        self.snapshots.push(snapshot);
    }

    /// Pop the most recent snapshot.
    pub fn pop(&mut self) -> Result<TaskList, TaskError> {
        self.snapshots.pop().ok_or(TaskError::UndoUnavailable)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

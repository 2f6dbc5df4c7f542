//! The in-memory task list.
//!
//! Tasks are stored in insertion order. Callers address them with 1-based
//! IDs; every ID-taking operation is bounds-checked and reports
//! `IndexOutOfRange` instead of panicking.

use crate::codec;
use crate::error::TaskError;
use crate::task::Task;

/// Ordered, mutable collection of tasks.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Append a task and return the new size.
    pub fn add(&mut self, task: Task) -> usize {
        self.tasks.push(task);
        self.tasks.len()
    }

    /// Get the task with the given 1-based ID.
    pub fn get(&self, id: i64) -> Result<&Task, TaskError> {
        let idx = self.index_of(id)?;
        Ok(&self.tasks[idx])
    }

    /// Remove and return the task with the given ID. Later tasks shift down by one.
    pub fn remove(&mut self, id: i64) -> Result<Task, TaskError> {
        let idx = self.index_of(id)?;
        Ok(self.tasks.remove(idx))
    }

    /// Mark a task done. Marking a done task again is not an error.
    pub fn mark_done(&mut self, id: i64) -> Result<&Task, TaskError> {
        let idx = self.index_of(id)?;
        let task = &mut self.tasks[idx];
        task.mark_done();
        Ok(task)
    }

    /// Mark a task not done.
    pub fn mark_not_done(&mut self, id: i64) -> Result<&Task, TaskError> {
        let idx = self.index_of(id)?;
        let task = &mut self.tasks[idx];
        task.mark_not_done();
        Ok(task)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Whether a structurally equal task is already present.
    pub fn contains(&self, task: &Task) -> bool {
        self.tasks.contains(task)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Deep copy used as an undo snapshot.
    pub fn snapshot(&self) -> TaskList {
        self.clone()
    }

    /// Encode every task in list order.
    pub fn serialize_all(&self) -> Vec<String> {
        codec::encode_all(self)
    }

    /// Decode a task file, failing on the first malformed line.
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<TaskList, TaskError> {
        codec::decode_all(lines)
    }

    /// Numbered listing, one task per line, starting at 1.
    pub fn numbered(&self) -> String {
        self.tasks
            .iter()
            .enumerate()
            .map(|(i, t)| format!("{}.{}", i + 1, t))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn index_of(&self, id: i64) -> Result<usize, TaskError> {
        let size = self.tasks.len();
        if id < 1 || id as u64 > size as u64 {
            return Err(TaskError::IndexOutOfRange { id, size });
        }
        Ok((id - 1) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(names: &[&str]) -> TaskList {
        let mut tasks = TaskList::default();
        for name in names {
            tasks.add(Task::todo(name).unwrap());
        }
        tasks
    }

    fn names(tasks: &TaskList) -> Vec<&str> {
        tasks.iter().map(|t| t.description()).collect()
    }

    #[test]
    fn add_returns_new_size() {
        let mut tasks = TaskList::default();
        assert_eq!(tasks.add(Task::todo("a").unwrap()), 1);
        assert_eq!(tasks.add(Task::todo("b").unwrap()), 2);
        assert_eq!(tasks.len(), 2);
    }

    #[test]
    fn ids_are_one_based_and_bounds_checked() {
        let tasks = list_of(&["a", "b"]);
        assert_eq!(tasks.get(1).unwrap().description(), "a");
        assert_eq!(tasks.get(2).unwrap().description(), "b");
        for id in [0, 3, -1, i64::MAX] {
            match tasks.get(id) {
                Err(TaskError::IndexOutOfRange { id: got, size }) => {
                    assert_eq!(got, id);
                    assert_eq!(size, 2);
                }
                other => panic!("expected out of range for {id}, got {other:?}"),
            }
        }
    }

    #[test]
    fn remove_shifts_later_ids_down() {
        let mut tasks = list_of(&["a", "b", "c", "d"]);
        let removed = tasks.remove(2).unwrap();
        assert_eq!(removed.description(), "b");
        assert_eq!(names(&tasks), vec!["a", "c", "d"]);
        assert_eq!(tasks.get(2).unwrap().description(), "c");
        assert!(tasks.remove(4).is_err());
        assert_eq!(tasks.len(), 3);
    }

    #[test]
    fn marking_in_place_is_idempotent() {
        let mut tasks = list_of(&["a"]);
        assert!(tasks.mark_done(1).unwrap().is_done());
        let before = tasks.clone();
        tasks.mark_done(1).unwrap();
        assert_eq!(tasks, before);
        assert!(!tasks.mark_not_done(1).unwrap().is_done());
        assert!(matches!(
            tasks.mark_done(2),
            Err(TaskError::IndexOutOfRange { id: 2, size: 1 })
        ));
    }

    #[test]
    fn snapshot_is_independent_of_later_mutation() {
        let mut tasks = list_of(&["a", "b"]);
        let snapshot = tasks.snapshot();
        tasks.mark_done(1).unwrap();
        tasks.remove(2).unwrap();
        assert!(!snapshot.get(1).unwrap().is_done());
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn numbered_listing() {
        let tasks = list_of(&["a", "b"]);
        assert_eq!(tasks.numbered(), "1.[T][ ] a\n2.[T][ ] b");
    }

    #[test]
    fn serialize_then_parse_reproduces_list() {
        let mut tasks = list_of(&["a", "b"]);
        tasks.mark_done(2).unwrap();
        let parsed = TaskList::parse(&tasks.serialize_all()).unwrap();
        assert_eq!(parsed, tasks);
    }
}

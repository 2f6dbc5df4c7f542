//! Executes parsed commands against the live task list.
//!
//! A `Session` owns the task list, the undo history and the storage handle.
//! Each call to [`Session::execute`] runs one command to completion and
//! returns the message to show the user.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::db::TaskList;
use crate::error::TaskError;
use crate::fields::Action;
use crate::history::History;
use crate::parser::{Command, Keywords};
use crate::storage::Storage;
use crate::task::{parse_time, Task};

const GREETING: &str = "Hello! I'm your task assistant.\nWhat can I do for you?";
const FAREWELL: &str = "Bye. Hope to see you again soon!";

/// Live state of one conversation.
pub struct Session<S: Storage> {
    tasks: TaskList,
    history: History,
    storage: S,
    path: PathBuf,
    keywords: Keywords,
    terminated: bool,
}

impl<S: Storage> Session<S> {
    /// Start with an empty list backed by the file at `path`.
    pub fn new(storage: S, path: impl Into<PathBuf>, keywords: Keywords) -> Self {
        Session {
            tasks: TaskList::default(),
            history: History::default(),
            storage,
            path: path.into(),
            keywords,
            terminated: false,
        }
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn keywords(&self) -> &Keywords {
        &self.keywords
    }

    /// Whether `bye` has been executed.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Number of commands that can still be undone.
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Run one command and return the response text.
    pub fn execute(&mut self, command: &Command) -> Result<String, TaskError> {
        debug!(action = %command.action(), params = ?command.params(), "executing command");
        match command.action() {
            Action::Nothing => Ok(String::new()),
            Action::Greet => Ok(GREETING.to_string()),
            Action::Echo => Ok(command.param(0).to_string()),
            Action::Exit => {
                self.terminated = true;
                Ok(FAREWELL.to_string())
            }
            Action::Help => Ok(format!(
                "Here are the commands I understand:\n{}",
                self.keywords.usage()
            )),
            Action::List => Ok(self.list()),
            Action::Mark => {
                let id = parse_id(command)?;
                let task = self.mutate(|tasks| tasks.mark_done(id).map(Task::render))?;
                Ok(format!("Nice! I've marked this task as done:\n{task}"))
            }
            Action::Unmark => {
                let id = parse_id(command)?;
                let task = self.mutate(|tasks| tasks.mark_not_done(id).map(Task::render))?;
                Ok(format!("OK, I've marked this task as not done yet:\n{task}"))
            }
            Action::Delete => {
                let id = parse_id(command)?;
                let task = self.mutate(|tasks| tasks.remove(id))?;
                Ok(format!(
                    "Noted. I've removed this task:\n{task}\n{}",
                    self.count_line()
                ))
            }
            Action::Todo => self.add(Task::todo(command.param(0))?),
            Action::Deadline => {
                let when = parse_command_time(command)?;
                self.add(Task::deadline(command.param(0), when)?)
            }
            Action::Event => {
                let start = parse_command_time(command)?;
                self.add(Task::event(command.param(0), start)?)
            }
            Action::Save => self.save(),
            Action::Read => self.read(),
            Action::Undo => self.undo(),
        }
    }

    /// Load the task file at startup. A missing file leaves the list empty.
    pub fn load(&mut self) -> Result<usize, TaskError> {
        match self.storage.read_all_lines(&self.path) {
            Ok(lines) => {
                self.tasks = TaskList::parse(&lines)?;
                info!(path = %self.path.display(), tasks = self.tasks.len(), "loaded task file");
                Ok(self.tasks.len())
            }
            Err(TaskError::Storage { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                info!(path = %self.path.display(), "no task file yet, starting empty");
                Ok(0)
            }
            Err(e) => Err(e),
        }
    }

    /// Apply a mutation and record the prior state once it succeeds.
    fn mutate<T>(
        &mut self,
        f: impl FnOnce(&mut TaskList) -> Result<T, TaskError>,
    ) -> Result<T, TaskError> {
        let snapshot = self.tasks.snapshot();
        let out = f(&mut self.tasks)?;
        self.history.push(snapshot);
        Ok(out)
    }

    fn add(&mut self, task: Task) -> Result<String, TaskError> {
        if self.tasks.contains(&task) {
            return Err(TaskError::DuplicateTask {
                task: task.render(),
            });
        }
        let rendered = task.render();
        self.mutate(|tasks| Ok(tasks.add(task)))?;
        Ok(format!(
            "Got it. I've added this task:\n{rendered}\n{}",
            self.count_line()
        ))
    }

    fn list(&self) -> String {
        if self.tasks.is_empty() {
            "Currently no tasks in the list.".to_string()
        } else {
            format!("Here are the tasks in your list:\n{}", self.tasks.numbered())
        }
    }

    fn save(&mut self) -> Result<String, TaskError> {
        let lines = self.tasks.serialize_all();
        self.storage.write_all_lines(&self.path, &lines)?;
        info!(path = %self.path.display(), tasks = lines.len(), "saved task file");
        Ok(format!(
            "Your {} been saved successfully.",
            task_count(self.tasks.len())
        ))
    }

    fn read(&mut self) -> Result<String, TaskError> {
        let lines = self.storage.read_all_lines(&self.path)?;
        let tasks = TaskList::parse(&lines)?;
        self.tasks = tasks;
        info!(path = %self.path.display(), tasks = self.tasks.len(), "read task file");
        Ok(format!(
            "Your {} been loaded successfully.\nType [list] to view your tasks.",
            task_count(self.tasks.len())
        ))
    }

    fn undo(&mut self) -> Result<String, TaskError> {
        self.tasks = self.history.pop()?;
        debug!(remaining = self.history.len(), "undid last command");
        let mut msg =
            "Successfully undid the last command.\nType [list] to view current tasks.".to_string();
        if self.history.is_empty() {
            msg.push_str("\nThere is nothing further to undo.");
        }
        Ok(msg)
    }

    fn count_line(&self) -> String {
        match self.tasks.len() {
            1 => "Now you have 1 task in the list.".to_string(),
            n => format!("Now you have {n} tasks in the list."),
        }
    }
}

/// "1 task has" / "3 tasks have".
fn task_count(n: usize) -> String {
    if n == 1 {
        "1 task has".to_string()
    } else {
        format!("{n} tasks have")
    }
}

fn parse_id(command: &Command) -> Result<i64, TaskError> {
    command
        .param(0)
        .parse::<i64>()
        .map_err(|_| TaskError::invalid_argument(command.action(), "The argument should be an integer."))
}

fn parse_command_time(command: &Command) -> Result<chrono::NaiveDateTime, TaskError> {
    parse_time(command.param(1)).ok_or_else(|| {
        TaskError::invalid_argument(
            command.action(),
            format!("'{}' should look like yyyy-MM-dd HH:mm.", command.param(1)),
        )
    })
}

//! Enumerations for task kinds and command actions.
//!
//! `Kind` tags the three task variants and knows its on-disk type code.
//! `Action` tags every command the parser can produce, along with the
//! usage line shown in error hints and by `help`.

use std::fmt;

use serde::Serialize;

/// The three kinds of tracked item.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Kind {
    Todo,
    Deadline,
    Event,
}

impl Kind {
    /// Single-letter code used in the task file and in rendered output.
    pub fn code(self) -> char {
        match self {
            Kind::Todo => 'T',
            Kind::Deadline => 'D',
            Kind::Event => 'E',
        }
    }

    /// Inverse of [`Kind::code`].
    pub fn from_code(code: &str) -> Option<Kind> {
        match code {
            "T" => Some(Kind::Todo),
            "D" => Some(Kind::Deadline),
            "E" => Some(Kind::Event),
            _ => None,
        }
    }

    /// Whether tasks of this kind carry a time field.
    pub fn has_time(self) -> bool {
        !matches!(self, Kind::Todo)
    }
}

/// Tag identifying which operation a command represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Blank input. Produces no response.
    Nothing,
    Greet,
    Echo,
    Exit,
    List,
    Mark,
    Unmark,
    Todo,
    Deadline,
    Event,
    Delete,
    Save,
    Read,
    Undo,
    Help,
}

impl Action {
    /// Every action reachable from a keyword, in the order `help` lists them.
    pub const DOCUMENTED: [Action; 14] = [
        Action::List,
        Action::Todo,
        Action::Deadline,
        Action::Event,
        Action::Mark,
        Action::Unmark,
        Action::Delete,
        Action::Undo,
        Action::Save,
        Action::Read,
        Action::Greet,
        Action::Echo,
        Action::Help,
        Action::Exit,
    ];

    /// Canonical keyword for the action.
    pub fn keyword(self) -> &'static str {
        match self {
            Action::Nothing => "",
            Action::Greet => "greet",
            Action::Echo => "echo",
            Action::Exit => "bye",
            Action::List => "list",
            Action::Mark => "mark",
            Action::Unmark => "unmark",
            Action::Todo => "todo",
            Action::Deadline => "deadline",
            Action::Event => "event",
            Action::Delete => "delete",
            Action::Save => "save",
            Action::Read => "read",
            Action::Undo => "undo",
            Action::Help => "help",
        }
    }

    /// Usage line for the action.
    pub fn format(self) -> &'static str {
        match self {
            Action::Nothing => "",
            Action::Greet => "greet",
            Action::Echo => "echo [Text]",
            Action::Exit => "bye",
            Action::List => "list",
            Action::Mark => "mark [ID of task]",
            Action::Unmark => "unmark [ID of task]",
            Action::Todo => "todo [Name]",
            Action::Deadline => "deadline [Deadline Name] /by [Deadline Time(yyyy-MM-dd HH:mm)]",
            Action::Event => "event [Event Name] /at [Event Time(yyyy-MM-dd HH:mm)]",
            Action::Delete => "delete [ID of task]",
            Action::Save => "save",
            Action::Read => "read",
            Action::Undo => "undo",
            Action::Help => "help",
        }
    }

    /// Whether executing the action changes the task list and so can be undone.
    pub fn is_mutating(self) -> bool {
        matches!(
            self,
            Action::Todo
                | Action::Deadline
                | Action::Event
                | Action::Mark
                | Action::Unmark
                | Action::Delete
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

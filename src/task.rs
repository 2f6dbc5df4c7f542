//! Task data structure and related functionality.
//!
//! A `Task` is one tracked item: a todo, a deadline with a due time, or an
//! event with a start time. Construction goes through the per-kind factories,
//! which validate the description once.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::codec;
use crate::error::TaskError;
use crate::fields::Kind;

/// Pattern for time text typed by the user and stored on disk (`yyyy-MM-dd HH:mm`).
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Pattern used when rendering a time for display.
const DISPLAY_FORMAT: &str = "%b %d %Y %H:%M";

/// Character reserved by the task file format.
pub const RESERVED_SEPARATOR: char = '}';

/// A single tracked item.
///
/// Equality is structural: kind, description, done flag and time field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    kind: Kind,
    description: String,
    is_done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<NaiveDateTime>,
}

impl Task {
    /// Create a todo item.
    pub fn todo(description: &str) -> Result<Self, TaskError> {
        Self::build(Kind::Todo, description, None)
    }

    /// Create a deadline due at `when`.
    pub fn deadline(description: &str, when: NaiveDateTime) -> Result<Self, TaskError> {
        Self::build(Kind::Deadline, description, Some(when))
    }

    /// Create an event happening at `start`.
    pub fn event(description: &str, start: NaiveDateTime) -> Result<Self, TaskError> {
        Self::build(Kind::Event, description, Some(start))
    }

    fn build(kind: Kind, description: &str, time: Option<NaiveDateTime>) -> Result<Self, TaskError> {
        let description = description.trim();
        if !is_valid_text(description) {
            return Err(TaskError::InvalidDescription {
                description: description.to_string(),
            });
        }
        Ok(Task {
            kind,
            description: description.to_string(),
            is_done: false,
            time,
        })
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_done(&self) -> bool {
        self.is_done
    }

    /// Due time of a deadline.
    pub fn when(&self) -> Option<NaiveDateTime> {
        match self.kind {
            Kind::Deadline => self.time,
            _ => None,
        }
    }

    /// Start time of an event.
    pub fn start(&self) -> Option<NaiveDateTime> {
        match self.kind {
            Kind::Event => self.time,
            _ => None,
        }
    }

    /// The time field of either timed kind.
    pub fn time(&self) -> Option<NaiveDateTime> {
        self.time
    }

    pub fn mark_done(&mut self) {
        self.is_done = true;
    }

    pub fn mark_not_done(&mut self) {
        self.is_done = false;
    }

    /// One-line human-readable form, e.g. `[D][X] submit report (by: Jan 01 2023 10:00)`.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Line form used by the task file.
    pub fn serialize(&self) -> String {
        codec::encode_task(self)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let done = if self.is_done { 'X' } else { ' ' };
        write!(f, "[{}][{}] {}", self.kind.code(), done, self.description)?;
        if let Some(t) = self.when() {
            write!(f, " (by: {})", t.format(DISPLAY_FORMAT))?;
        } else if let Some(t) = self.start() {
            write!(f, " (at: {})", t.format(DISPLAY_FORMAT))?;
        }
        Ok(())
    }
}

/// Text is valid as a description or time field when it is non-empty, free
/// of the reserved separator, and fits on one line of the task file.
pub fn is_valid_text(s: &str) -> bool {
    !s.trim().is_empty() && !s.contains([RESERVED_SEPARATOR, '\n', '\r'])
}

/// Parse time text in [`TIME_FORMAT`]. Every field must be zero-padded.
pub fn parse_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, TIME_FORMAT)
        .ok()
        .filter(|t| format_time(*t) == s)
}

/// Format a time in [`TIME_FORMAT`].
pub fn format_time(t: NaiveDateTime) -> String {
    t.format(TIME_FORMAT).to_string()
}

//! Turns a line of user input into a validated [`Command`].
//!
//! The first whitespace-delimited word picks the action through a
//! [`Keywords`] table; the rest of the line is checked against that
//! action's grammar. Parsing has no side effects.

use std::collections::HashMap;

use crate::error::TaskError;
use crate::fields::Action;
use crate::task::{is_valid_text, parse_time};

const EVENT_MARKER: &str = " /at ";
const DEADLINE_MARKER: &str = " /by ";
const NOT_AN_INTEGER: &str = "The argument should be an integer.";

/// A parsed instruction: an action and its string parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    action: Action,
    params: Vec<String>,
}

impl Command {
    pub fn new(action: Action) -> Self {
        Command {
            action,
            params: Vec::new(),
        }
    }

    pub fn with_params<I, S>(action: Action, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Command {
            action,
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Parameter at `idx`, or an empty string when absent.
    pub fn param(&self, idx: usize) -> &str {
        self.params.get(idx).map(String::as_str).unwrap_or("")
    }
}

/// Keyword to action mapping, built once and shared by reference.
#[derive(Debug, Clone)]
pub struct Keywords {
    map: HashMap<&'static str, Action>,
}

impl Keywords {
    /// The standard keyword set. `bye` and `exit` both end the session.
    pub fn standard() -> Self {
        let mut map: HashMap<&'static str, Action> = Action::DOCUMENTED
            .iter()
            .map(|&a| (a.keyword(), a))
            .collect();
        map.insert("exit", Action::Exit);
        Keywords { map }
    }

    pub fn lookup(&self, word: &str) -> Option<Action> {
        self.map.get(word).copied()
    }

    /// Usage lines for `help`.
    pub fn usage(&self) -> String {
        Action::DOCUMENTED
            .iter()
            .filter(|a| self.map.values().any(|v| v == *a))
            .map(|a| a.format())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Keywords {
    fn default() -> Self {
        Keywords::standard()
    }
}

/// Parse one line of input.
pub fn parse_command(input: &str, keywords: &Keywords) -> Result<Command, TaskError> {
    let line = input.trim();
    if line.is_empty() {
        return Ok(Command::new(Action::Nothing));
    }

    let (word, rest) = match line.find(char::is_whitespace) {
        Some(idx) => line.split_at(idx),
        None => (line, ""),
    };
    let action = keywords
        .lookup(word)
        .ok_or_else(|| TaskError::InvalidAction {
            keyword: word.to_string(),
        })?;

    match action {
        // Trailing text after a zero-argument keyword is ignored.
        Action::Nothing
        | Action::Greet
        | Action::Exit
        | Action::List
        | Action::Save
        | Action::Read
        | Action::Undo
        | Action::Help => Ok(Command::new(action)),
        Action::Echo => Ok(Command::with_params(action, [rest.trim()])),
        Action::Mark | Action::Unmark | Action::Delete => parse_id_argument(action, rest),
        Action::Todo => parse_name_argument(action, rest),
        Action::Event => parse_timed_argument(action, rest, EVENT_MARKER, "Event"),
        Action::Deadline => parse_timed_argument(action, rest, DEADLINE_MARKER, "Deadline"),
    }
}

fn parse_id_argument(action: Action, rest: &str) -> Result<Command, TaskError> {
    let arg = rest.trim();
    if arg.is_empty() {
        return Err(TaskError::MissingArgument { action });
    }
    if arg.parse::<i64>().is_err() {
        return Err(TaskError::invalid_argument(action, NOT_AN_INTEGER));
    }
    Ok(Command::with_params(action, [arg]))
}

fn parse_name_argument(action: Action, rest: &str) -> Result<Command, TaskError> {
    let arg = rest.trim();
    if arg.is_empty() {
        return Err(TaskError::MissingArgument { action });
    }
    if !is_valid_text(arg) {
        return Err(TaskError::invalid_argument(
            action,
            "Todo details should be a single line without '}'.",
        ));
    }
    Ok(Command::with_params(action, [arg]))
}

/// Split `rest` at the first occurrence of `marker` into a name and a time.
///
/// Only the first occurrence counts, so a name that itself contains the
/// marker text is cut short there.
fn parse_timed_argument(
    action: Action,
    rest: &str,
    marker: &str,
    label: &str,
) -> Result<Command, TaskError> {
    let Some(idx) = rest.find(marker) else {
        return Err(TaskError::invalid_argument(
            action,
            format!("Keyword: [{}] or [Time] is not found.", marker.trim()),
        ));
    };
    let name = rest[..idx].trim();
    let time = rest[idx + marker.len()..].trim();

    if name.is_empty() && time.is_empty() {
        return Err(TaskError::MissingArgument { action });
    }
    if !is_valid_text(name) {
        return Err(TaskError::invalid_argument(
            action,
            format!("{label} [Name] is not found."),
        ));
    }
    if !is_valid_text(time) {
        return Err(TaskError::invalid_argument(
            action,
            format!("{label} [Time] is not found."),
        ));
    }
    if parse_time(time).is_none() {
        return Err(TaskError::invalid_argument(
            action,
            format!("{label} [Time] '{time}' should look like yyyy-MM-dd HH:mm."),
        ));
    }
    Ok(Command::with_params(action, [name, time]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Command, TaskError> {
        parse_command(input, &Keywords::standard())
    }

    fn reason(err: TaskError) -> String {
        match err {
            TaskError::InvalidArgument { reason, .. } => reason,
            other => panic!("expected invalid argument, got {other:?}"),
        }
    }

    #[test]
    fn todo_needs_a_name() {
        assert!(matches!(
            parse("todo"),
            Err(TaskError::MissingArgument { action: Action::Todo })
        ));
        assert!(matches!(
            parse("todo    "),
            Err(TaskError::MissingArgument { action: Action::Todo })
        ));
        assert_eq!(
            parse("todo read book").unwrap(),
            Command::with_params(Action::Todo, ["read book"])
        );
        assert!(reason(parse("todo a } b").unwrap_err()).contains('}'));
        assert!(matches!(
            parse("todo a\nb"),
            Err(TaskError::InvalidArgument { action: Action::Todo, .. })
        ));
        assert_eq!(
            reason(parse("deadline a\nb /by 2023-01-01 10:00").unwrap_err()),
            "Deadline [Name] is not found."
        );
    }

    #[test]
    fn deadline_splits_on_by_marker() {
        assert_eq!(
            parse("deadline submit report /by 2023-01-01 10:00").unwrap(),
            Command::with_params(Action::Deadline, ["submit report", "2023-01-01 10:00"])
        );
    }

    #[test]
    fn event_without_marker_is_invalid() {
        let msg = reason(parse("event meeting").unwrap_err());
        assert!(msg.contains("/at"));
        // The marker needs a space on both sides.
        assert!(parse("event meeting /at").is_err());
    }

    #[test]
    fn event_fields_are_checked_separately() {
        assert!(matches!(
            parse("event /at "),
            Err(TaskError::InvalidArgument { .. })
        ));
        assert!(matches!(
            parse("event  /at  x"),
            Err(TaskError::InvalidArgument { .. })
        ));
        assert_eq!(
            reason(parse("event  /at 2023-01-01 10:00").unwrap_err()),
            "Event [Name] is not found."
        );
        assert_eq!(
            reason(parse("event party /at 2023-01-01 } 10:00").unwrap_err()),
            "Event [Time] is not found."
        );
        assert!(reason(parse("event party /at tomorrow").unwrap_err()).contains("yyyy-MM-dd HH:mm"));
        assert!(reason(parse("event party /at 2023-1-1 9:5").unwrap_err()).contains("yyyy-MM-dd HH:mm"));
    }

    #[test]
    fn first_marker_wins() {
        // "/by" inside the intended name splits early, leaving an invalid time.
        let err = parse("deadline read /by chapter /by 2023-01-01 10:00").unwrap_err();
        assert!(reason(err).contains("[Time]"));

        assert_eq!(
            parse("event talk /at 2023-01-01 10:00").unwrap().params(),
            ["talk", "2023-01-01 10:00"]
        );
    }

    #[test]
    fn id_arguments_must_be_integers() {
        assert!(matches!(
            parse("mark"),
            Err(TaskError::MissingArgument { action: Action::Mark })
        ));
        assert_eq!(reason(parse("mark x").unwrap_err()), NOT_AN_INTEGER);
        assert_eq!(reason(parse("delete 1 2").unwrap_err()), NOT_AN_INTEGER);
        assert_eq!(
            parse("unmark 3").unwrap(),
            Command::with_params(Action::Unmark, ["3"])
        );
        // Range is checked against the list later, not here.
        assert_eq!(parse("delete -1").unwrap().param(0), "-1");
    }

    #[test]
    fn zero_argument_commands_ignore_trailing_text() {
        assert_eq!(parse("list").unwrap(), Command::new(Action::List));
        assert_eq!(parse("list foo").unwrap(), Command::new(Action::List));
        assert_eq!(parse("undo everything").unwrap(), Command::new(Action::Undo));
        assert_eq!(parse("  save  ").unwrap(), Command::new(Action::Save));
    }

    #[test]
    fn bye_and_exit_both_end_the_session() {
        assert_eq!(parse("bye").unwrap().action(), Action::Exit);
        assert_eq!(parse("exit").unwrap().action(), Action::Exit);
    }

    #[test]
    fn unknown_keyword_is_reported() {
        match parse("blah blah").unwrap_err() {
            TaskError::InvalidAction { keyword } => assert_eq!(keyword, "blah"),
            other => panic!("unexpected error: {other:?}"),
        }
        // Keywords are case-sensitive and must stand alone.
        assert!(parse("LIST").is_err());
        assert!(parse("listfoo").is_err());
    }

    #[test]
    fn blank_input_does_nothing() {
        assert_eq!(parse("").unwrap(), Command::new(Action::Nothing));
        assert_eq!(parse(" \t ").unwrap(), Command::new(Action::Nothing));
    }

    #[test]
    fn echo_keeps_the_rest_of_the_line() {
        assert_eq!(parse("echo  hi there ").unwrap().param(0), "hi there");
        assert_eq!(parse("echo").unwrap().param(0), "");
    }

    #[test]
    fn help_lists_every_keyword() {
        let usage = Keywords::standard().usage();
        assert!(usage.contains("deadline [Deadline Name] /by"));
        assert!(usage.contains("undo"));
        assert_eq!(usage.lines().count(), Action::DOCUMENTED.len());
    }
}

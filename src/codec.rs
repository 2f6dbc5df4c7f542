//! Line format for the task file.
//!
//! One task per line, fields joined by ` } `:
//!
//! ```text
//! T } 0 } read book
//! D } 1 } submit report } 2023-01-01 10:00
//! E } 0 } meeting } 2023-03-15 14:30
//! ```
//!
//! Descriptions can never contain `}` (the task constructors reject it), so
//! the format needs no escaping.

use crate::db::TaskList;
use crate::error::TaskError;
use crate::fields::Kind;
use crate::task::{format_time, parse_time, Task, RESERVED_SEPARATOR};

const FIELD_SEPARATOR: &str = " } ";

/// Encode one task as a line, without the terminator.
pub fn encode_task(task: &Task) -> String {
    let mut fields = vec![
        task.kind().code().to_string(),
        if task.is_done() { "1" } else { "0" }.to_string(),
        task.description().to_string(),
    ];
    if let Some(t) = task.time() {
        fields.push(format_time(t));
    }
    fields.join(FIELD_SEPARATOR)
}

/// Encode a whole list, one `\n`-terminated line per task.
pub fn encode_all(tasks: &TaskList) -> Vec<String> {
    tasks.iter().map(Task::serialize).collect()
}

/// Decode one line. `line_no` is 1-based and only used for error reporting.
pub fn decode_line(line_no: usize, line: &str) -> Result<Task, TaskError> {
    let malformed = |reason: String| TaskError::MalformedLine {
        line: line_no,
        content: line.to_string(),
        reason,
    };

    let fields: Vec<&str> = line.split(RESERVED_SEPARATOR).map(str::trim).collect();
    if fields.len() < 3 {
        return Err(malformed(format!("expected at least 3 fields, found {}", fields.len())));
    }

    let kind = Kind::from_code(fields[0])
        .ok_or_else(|| malformed(format!("unknown type code '{}'", fields[0])))?;

    let is_done = match fields[1] {
        "0" => false,
        "1" => true,
        other => return Err(malformed(format!("done flag must be 0 or 1, found '{other}'"))),
    };

    let expected = if kind.has_time() { 4 } else { 3 };
    if fields.len() != expected {
        return Err(malformed(format!(
            "type '{}' takes {expected} fields, found {}",
            fields[0],
            fields.len()
        )));
    }

    let description = fields[2];
    let mut task = match kind {
        Kind::Todo => Task::todo(description),
        Kind::Deadline | Kind::Event => {
            let time = parse_time(fields[3])
                .ok_or_else(|| malformed(format!("invalid time '{}'", fields[3])))?;
            if kind == Kind::Deadline {
                Task::deadline(description, time)
            } else {
                Task::event(description, time)
            }
        }
    }
    .map_err(|e| malformed(e.to_string()))?;

    if is_done {
        task.mark_done();
    }
    Ok(task)
}

/// Decode a whole file. Blank lines are skipped; any other bad line fails the
/// whole decode.
pub fn decode_all<S: AsRef<str>>(lines: &[S]) -> Result<TaskList, TaskError> {
    let mut tasks = TaskList::default();
    for (idx, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }
        tasks.add(decode_line(idx + 1, line)?);
    }
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> chrono::NaiveDateTime {
        parse_time(s).unwrap()
    }

    fn sample() -> TaskList {
        let mut tasks = TaskList::default();
        tasks.add(Task::todo("read book").unwrap());
        let mut deadline = Task::deadline("submit report", at("2023-01-01 10:00")).unwrap();
        deadline.mark_done();
        tasks.add(deadline);
        tasks.add(Task::event("project meeting", at("2023-03-15 14:30")).unwrap());
        tasks
    }

    #[test]
    fn encodes_in_documented_layout() {
        assert_eq!(
            encode_all(&sample()),
            vec![
                "T } 0 } read book",
                "D } 1 } submit report } 2023-01-01 10:00",
                "E } 0 } project meeting } 2023-03-15 14:30",
            ]
        );
    }

    #[test]
    fn round_trip_preserves_every_field() {
        let original = sample();
        let decoded = decode_all(&encode_all(&original)).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn empty_input_is_empty_list() {
        let lines: Vec<String> = Vec::new();
        assert!(decode_all(&lines).unwrap().is_empty());
        assert!(decode_all(&["", "   "]).unwrap().is_empty());
    }

    #[test]
    fn tolerates_irregular_spacing() {
        let task = decode_line(1, "D}0}  pay rent }2024-02-01 09:00").unwrap();
        assert_eq!(task.description(), "pay rent");
        assert_eq!(task.when(), Some(at("2024-02-01 09:00")));
    }

    #[test]
    fn multi_line_text_never_reaches_the_file() {
        assert!(Task::todo("first\nsecond").is_err());
        assert!(Task::event("a\rb", at("2023-01-01 10:00")).is_err());
        // A split record in the file is caught on decode.
        assert!(matches!(
            decode_all(&["T } 0 } first", "second"]),
            Err(TaskError::MalformedLine { line: 2, .. })
        ));
    }

    #[test]
    fn rejects_unpadded_times() {
        assert!(matches!(
            decode_line(1, "D } 0 } pay rent } 2024-2-1 9:00"),
            Err(TaskError::MalformedLine { .. })
        ));
    }

    #[test]
    fn reports_line_number_and_content() {
        let err = decode_all(&["T } 0 } ok", "D } 0 } no time"]).unwrap_err();
        match err {
            TaskError::MalformedLine { line, content, .. } => {
                assert_eq!(line, 2);
                assert_eq!(content, "D } 0 } no time");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_lines() {
        let bad = [
            "X } 0 } unknown kind",
            "T } 2 } bad flag",
            "T } 0 } todo with time } 2023-01-01 10:00",
            "E } 0 } bad time } next tuesday",
            "T } 0 }    ",
            "T } 0",
        ];
        for line in bad {
            assert!(
                matches!(decode_line(1, line), Err(TaskError::MalformedLine { .. })),
                "accepted {line:?}"
            );
        }
    }
}

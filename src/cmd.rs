//! Subcommand implementations for the binary.
//!
//! `chat` is the interactive read loop; `export` and `completions` are
//! one-shot helpers around the same task file.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};
use crossterm::tty::IsTty;
use tracing::{debug, warn};

use crate::cli::Cli;
use crate::db::TaskList;
use crate::fields::Action;
use crate::parser::{parse_command, Command, Keywords};
use crate::printer::MessagePrinter;
use crate::session::Session;
use crate::storage::{DiskStorage, Storage};
use crate::task::Task;

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive prompt (the default).
    Chat,

    /// Export the task file as JSON.
    Export {
        /// Output file path (default: stdout).
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Run the read loop until `bye` or end of input.
pub fn cmd_chat(path: &Path) -> anyhow::Result<()> {
    let mut session = Session::new(DiskStorage, path, Keywords::standard());
    if let Err(e) = session.load() {
        warn!(error = %e, "could not load task file, starting with an empty list");
    }

    let stdout = io::stdout();
    let printer = MessagePrinter::default().with_colour(stdout.is_tty());
    let mut out = stdout.lock();

    let greeting = session.execute(&Command::new(Action::Greet))?;
    writeln!(out, "{}", printer.frame(&greeting))?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read from stdin")?;
        let response =
            parse_command(&line, session.keywords()).and_then(|command| session.execute(&command));
        match response {
            Ok(msg) if msg.is_empty() => {}
            Ok(msg) => writeln!(out, "{}", printer.frame(&msg))?,
            Err(e) => {
                if e.is_persistence() {
                    warn!(error = %e, "task file access failed");
                } else {
                    debug!(input = %line, error = ?e, "command failed");
                }
                writeln!(out, "{}", printer.frame_error(&e.to_string()))?;
            }
        }
        out.flush()?;
        if session.is_terminated() {
            break;
        }
    }
    debug!(tasks = session.tasks().len(), undoable = session.undo_depth(), "session ended");
    Ok(())
}

/// Write the task file as a JSON array.
pub fn cmd_export(path: &Path, output: Option<PathBuf>) -> anyhow::Result<()> {
    let lines = DiskStorage.read_all_lines(path)?;
    let tasks = TaskList::parse(&lines)?;
    let json = export_json(&tasks)?;

    match output {
        Some(out_path) => {
            fs::write(&out_path, json)
                .with_context(|| format!("failed to write {}", out_path.display()))?;
            println!("Exported {} tasks to {}", tasks.len(), out_path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn export_json(tasks: &TaskList) -> serde_json::Result<String> {
    let items: Vec<&Task> = tasks.iter().collect();
    serde_json::to_string_pretty(&items)
}

/// Print a completion script for `shell`.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::parse_time;

    #[test]
    fn export_json_shape() {
        let mut tasks = TaskList::default();
        tasks.add(Task::todo("read book").unwrap());
        tasks.add(Task::deadline("report", parse_time("2023-01-01 10:00").unwrap()).unwrap());
        tasks.mark_done(2).unwrap();

        let json: serde_json::Value = serde_json::from_str(&export_json(&tasks).unwrap()).unwrap();
        let items = json.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["kind"], "todo");
        assert_eq!(items[0]["description"], "read book");
        assert!(items[0].get("time").is_none());
        assert_eq!(items[1]["kind"], "deadline");
        assert_eq!(items[1]["is_done"], true);
        assert_eq!(items[1]["time"], "2023-01-01T10:00:00");
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("tasks.txt");
        let dst = dir.path().join("tasks.json");
        fs::write(&src, "T } 0 } a\nE } 1 } b } 2023-03-15 14:30\n").unwrap();

        cmd_export(&src, Some(dst.clone())).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&dst).unwrap()).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
    }

    #[test]
    fn export_fails_on_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("tasks.txt");
        fs::write(&src, "T } 0 } a\nnot a task\n").unwrap();
        assert!(cmd_export(&src, None).is_err());
    }
}

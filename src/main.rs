//! # taskmate - line-oriented task assistant
//!
//! Type commands at a prompt and taskmate keeps a list of todos, deadlines and
//! events for you. The list is saved to a plain text file on request.
//!
//! ## Quick Start
//!
//! ```bash
//! taskmate                      # start the prompt, using ./data/tasks.txt
//! taskmate --file ~/tasks.txt   # use another task file
//! taskmate export -o tasks.json # dump the task file as JSON
//! ```
//!
//! ## Commands at the prompt
//!
//! - `todo <name>` - add a todo
//! - `deadline <name> /by <yyyy-MM-dd HH:mm>` - add a deadline
//! - `event <name> /at <yyyy-MM-dd HH:mm>` - add an event
//! - `list` - show every task with its ID
//! - `mark <id>` / `unmark <id>` / `delete <id>`
//! - `undo` - revert the last change to the list
//! - `save` / `read` - write the list to, or reload it from, the task file
//! - `help`, `bye`
//!
//! The task file holds one task per line, e.g. `D } 0 } submit report } 2023-01-01 10:00`.

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod cmd;
pub mod codec;
pub mod db;
pub mod error;
pub mod fields;
pub mod history;
pub mod parser;
pub mod printer;
pub mod session;
pub mod storage;
pub mod task;

use cli::Cli;
use cmd::*;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "taskmate=debug"
    } else {
        "taskmate=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => cmd_chat(&cli.file),
        Commands::Export { output } => cmd_export(&cli.file, output),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    }
}

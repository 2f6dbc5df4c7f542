use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Line-oriented task assistant.
/// Tasks live in a plain text file, ./data/tasks.txt unless --file says otherwise.
#[derive(Parser)]
#[command(name = "taskmate", version, about = "Track todos, deadlines and events from a chat-style prompt")]
pub struct Cli {
    /// Path to the task file.
    #[arg(long, global = true, env = "TASKMATE_FILE", default_value = "data/tasks.txt")]
    pub file: PathBuf,

    /// Log debug detail to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `chat`.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

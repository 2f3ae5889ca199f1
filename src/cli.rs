//! CLI argument parsing for punchlist.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "punchlist",
    about = "Single-user task list with a flat-file store and a small HTTP API",
    version
)]
pub struct Cli {
    /// Path to the JSON state file (default: platform data dir)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Keep state in memory only, never touch the filesystem
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve {
        /// Port to listen on (falls back to PORT env, then 4004)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Add a task
    Add {
        /// Task text
        text: String,

        /// Create the task already completed
        #[arg(long)]
        done: bool,
    },

    /// List tasks
    List {
        /// Filter by done state (true or false)
        #[arg(short, long)]
        done: Option<bool>,

        /// Case-insensitive substring to search for
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show a task by id
    Get {
        /// Task id
        id: u64,
    },

    /// Flip a task between open and done
    Toggle {
        /// Task id
        id: u64,
    },

    /// Remove a task
    Delete {
        /// Task id
        id: u64,
    },

    /// Remove every completed task
    ClearCompleted,

    /// Show total/open/done counts
    Stats,
}

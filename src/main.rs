//! Punchlist CLI - a single-user task list served over HTTP.

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use punchlist::{FileStorage, Item, MemoryStorage, STATE_FILE, Storage, Store, server};
use std::net::SocketAddr;
use std::path::PathBuf;

mod cli;

use cli::{Cli, Command};

/// Default listen port, matching the original deployment.
const DEFAULT_PORT: u16 = 4004;

fn setup_logging() {
    env_logger::Builder::from_default_env().init();
}

fn data_path(cli: &Cli) -> PathBuf {
    cli.data.clone().unwrap_or_else(|| {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("punchlist")
            .join(STATE_FILE)
    })
}

fn open_store(cli: &Cli) -> Store {
    let storage: Box<dyn Storage> = if cli.ephemeral {
        Box::new(MemoryStorage::default())
    } else {
        Box::new(FileStorage::new(data_path(cli)))
    };
    Store::open(storage)
}

fn resolve_port(flag: Option<u16>) -> u16 {
    flag.or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
        .unwrap_or(DEFAULT_PORT)
}

fn format_state(item: &Item) -> ColoredString {
    if item.done { "done".blue() } else { "open".green() }
}

fn print_item(item: &Item) {
    println!(
        "{} {} {}",
        format_state(item),
        item.id.to_string().cyan(),
        item.text
    );
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve { port } => {
            let store = open_store(&cli);
            let addr = SocketAddr::from(([0, 0, 0, 0], resolve_port(port)));

            let rt = tokio::runtime::Runtime::new().context("Failed to create runtime")?;
            rt.block_on(server::serve(store, addr)).context("Server error")?;
        }

        Command::Add { ref text, done } => {
            let mut store = open_store(&cli);
            let item = store.add(&text, done).context("Failed to add task")?;

            println!("{} Added: {} {}", "✓".green(), item.id.to_string().cyan(), item.text);
        }

        Command::List { done, ref search } => {
            let store = open_store(&cli);
            let items = store.list(done, search.as_deref());

            if items.is_empty() {
                println!("{}", "No tasks found".dimmed());
            } else {
                for item in items {
                    print_item(&item);
                }
            }
        }

        Command::Get { id } => {
            let store = open_store(&cli);

            match store.get(id) {
                Some(item) => print_item(&item),
                None => {
                    eprintln!("{} Task not found: {}", "✗".red(), id);
                    std::process::exit(1);
                }
            }
        }

        Command::Toggle { id } => {
            let mut store = open_store(&cli);
            let item = store.toggle(id).context("Failed to toggle task")?;

            println!(
                "{} {} is now {}",
                "✓".green(),
                item.id.to_string().cyan(),
                format_state(&item)
            );
        }

        Command::Delete { id } => {
            let mut store = open_store(&cli);
            store.delete(id).context("Failed to delete task")?;

            println!("{} Deleted: {}", "✓".green(), id.to_string().cyan());
        }

        Command::ClearCompleted => {
            let mut store = open_store(&cli);
            let removed = store.clear_completed();

            println!("{} Removed {} completed task(s)", "✓".green(), removed);
        }

        Command::Stats => {
            let store = open_store(&cli);
            let stats = store.stats();

            println!("{}: {}", "Total".bold(), stats.total);
            println!("{}: {}", "Open".bold(), stats.open.to_string().green());
            println!("{}: {}", "Done".bold(), stats.done.to_string().blue());
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    setup_logging();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

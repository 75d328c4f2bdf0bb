//! Taskboard command-line front end.
//!
//! Usage:
//!   taskboard add "Buy groceries" --due 2025-01-20
//!   taskboard list --status pending --date this_week
//!   taskboard list --search report --from 2025-01-01 --to 2025-01-31
//!   taskboard toggle 3f2a
//!   taskboard edit 3f2a --title "Buy groceries and bread"
//!   taskboard rm 3f2a
//!   taskboard stats

mod commands;
mod render;

use clap::{Parser, Subcommand};
use commands::{AddArgs, EditArgs, ListArgs};
use std::path::PathBuf;
use log::error;
use taskboard_core::{flush_logging, init_logging, TaskboardConfig};

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Personal task tracker")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the task database, config and logs
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a task
    Add(AddArgs),
    /// Edit fields of an existing task
    Edit(EditArgs),
    /// Flip a task between pending and completed
    Toggle {
        /// Task id or unique id prefix
        id: String,
    },
    /// Delete a task
    Rm {
        /// Task id or unique id prefix
        id: String,
    },
    /// Show one task
    Show {
        /// Task id or unique id prefix
        id: String,
    },
    /// List tasks, optionally filtered
    List(ListArgs),
    /// Show task counters
    Stats,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = TaskboardConfig::load(cli.data_dir.clone())?;

    // Logging is best effort; the CLI still works without a log file.
    if let Err(err) = init_logging(&config.log_level, config.log_dir()) {
        eprintln!("warning: logging disabled: {err}");
    }

    let result = run(cli, &config);
    if let Err(err) = &result {
        error!("event=cli_run module=cli status=error error={err}");
    }
    flush_logging();
    result
}

fn run(cli: Cli, config: &TaskboardConfig) -> anyhow::Result<()> {
    let conn = config.open_storage()?;
    let mut ctx = commands::Context::open(config, &conn, cli.json)?;

    match cli.command {
        Commands::Add(args) => ctx.add(args),
        Commands::Edit(args) => ctx.edit(args),
        Commands::Toggle { id } => ctx.toggle(&id),
        Commands::Rm { id } => ctx.remove(&id),
        Commands::Show { id } => ctx.show(&id),
        Commands::List(args) => ctx.list(args),
        Commands::Stats => ctx.stats(),
    }
}

//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use super::commands::{self, Session};
use super::output::{Output, OutputFormat};
use crate::storage::{Config, TodoFile};

#[derive(Parser)]
#[command(name = "todo")]
#[command(author, version, about = "Manage a todo.txt task list")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Todo file to use (defaults to the configured file, then ./todo.txt)
    #[arg(long, short = 'd', global = true, env = "TODO_FILE")]
    pub file: Option<PathBuf>,

    /// Config file to read instead of the default location
    #[arg(long, global = true, env = "TODOTXT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Shared listing options
#[derive(clap::Args)]
pub struct ListArgs {
    /// Terms every task must contain. Prefix with ~ to exclude (or pass
    /// -term after --), separate alternatives with | (e.g. "python|@tests")
    pub terms: Vec<String>,

    /// Priority filter: a letter, a list (A,C) or a range (A-C)
    #[arg(long, short)]
    pub priority: Option<String>,

    /// Match terms case-sensitively
    #[arg(long, short = 's')]
    pub case_sensitive: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task
    #[command(visible_alias = "a")]
    Add {
        /// Task line, e.g. "(A) Call mum @phone"
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Mark tasks as done
    Do {
        /// Task ids
        #[arg(required = true)]
        ids: Vec<u32>,
    },

    /// List open tasks
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        args: ListArgs,

        /// Include completed tasks
        #[arg(long, short)]
        all: bool,
    },

    /// List all tasks, completed ones included
    #[command(visible_alias = "lsa")]
    Listall {
        #[command(flatten)]
        args: ListArgs,
    },

    /// Append text to a task
    #[command(visible_alias = "app")]
    Append {
        id: u32,
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Prepend text to a task
    #[command(visible_alias = "prep")]
    Prepend {
        id: u32,
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Replace a task with a new line
    Replace {
        id: u32,
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Set a task's priority
    #[command(visible_alias = "p")]
    Pri {
        id: u32,
        /// Priority letter A-Z
        priority: String,
    },

    /// Remove a task's priority
    #[command(visible_alias = "dp")]
    Depri { id: u32 },

    /// Delete a task
    #[command(visible_alias = "del")]
    Rm { id: u32 },

    /// Remove duplicate tasks
    Dedup,

    /// List projects in use
    #[command(visible_alias = "lsprj")]
    Projects,

    /// List contexts in use
    #[command(visible_alias = "lsc")]
    Contexts,

    /// Show task statistics
    Report,
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "todotxt=debug,info" } else { "warn" })
    });

    // A subscriber may already be installed when run from tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let output = Output::new(cli.format.unwrap_or(config.default_format));
    let store = TodoFile::new(config.resolve_todo_file(cli.file.as_deref()));
    debug!(file = %store.path().display(), "Using todo file");

    let session = Session::new(store, &config, &output);

    match cli.command {
        Commands::Add { text } => commands::add(&session, &text.join(" "))?,
        Commands::Do { ids } => commands::complete(&session, &ids)?,
        Commands::List { args, all } => commands::list(&session, &args, all)?,
        Commands::Listall { args } => commands::list(&session, &args, true)?,
        Commands::Append { id, text } => commands::append(&session, id, &text.join(" "))?,
        Commands::Prepend { id, text } => commands::prepend(&session, id, &text.join(" "))?,
        Commands::Replace { id, text } => commands::replace(&session, id, &text.join(" "))?,
        Commands::Pri { id, priority } => commands::prioritise(&session, id, &priority)?,
        Commands::Depri { id } => commands::deprioritise(&session, id)?,
        Commands::Rm { id } => commands::remove(&session, id)?,
        Commands::Dedup => commands::deduplicate(&session)?,
        Commands::Projects => commands::projects(&session)?,
        Commands::Contexts => commands::contexts(&session)?,
        Commands::Report => commands::report(&session)?,
    }

    debug!("Command completed successfully");
    Ok(())
}

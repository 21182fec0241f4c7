use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr};
use std::path::PathBuf;
use std::process::ExitCode;
use tasktrack::config::STORE_ENV;
use tasktrack::{Config, ListFilter, NewTask, TaskError, TaskManager, TaskRef, TaskStore};
use tracing::debug;

#[derive(Parser)]
#[command(name = "tasktrack")]
#[command(about = "Command-line task tracker backed by a JSON file")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to the task file (default: <data dir>/tasktrack/tasks.json)
    #[arg(short, long, global = true, env = STORE_ENV)]
    file: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task description
        description: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due_date: Option<String>,

        /// Task priority: low, medium or high
        #[arg(long, default_value = "medium")]
        priority: String,

        /// Category to group the task under
        #[arg(long)]
        category: Option<String>,

        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },

    /// List tasks
    List {
        /// Hide completed tasks
        #[arg(long)]
        hide_completed: bool,

        /// Only show tasks in this category
        #[arg(long)]
        category: Option<String>,

        /// Only show tasks carrying this tag
        #[arg(long)]
        tag: Option<String>,

        /// Only show tasks whose description contains this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Mark a task as completed
    Complete {
        /// Task position (or short id from `list`)
        #[arg(allow_negative_numbers = true)]
        id: TaskRef,
    },

    /// Delete a task
    Delete {
        /// Task position (or short id from `list`)
        #[arg(allow_negative_numbers = true)]
        id: TaskRef,
    },

    /// Export all tasks to a file
    Export { filename: PathBuf },

    /// Replace all tasks with the contents of a file
    Import { filename: PathBuf },
}

/// Where a failure message is printed
#[derive(Debug, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

/// Message, stream and exit status for a failed command
///
/// Validation errors go to stdout like any other command output; anything
/// else is unexpected and goes to stderr. Both exit with status 1.
fn failure_report(e: &eyre::Report) -> (Stream, String, u8) {
    match e.downcast_ref::<TaskError>() {
        Some(err) if err.is_validation() => (Stream::Stdout, format!("Error: {}", err), 1),
        _ => (Stream::Stderr, format!("Error: {:#}", e), 1),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let (stream, message, status) = failure_report(&e);
            match stream {
                Stream::Stdout => println!("{}", message),
                Stream::Stderr => eprintln!("{}", message),
            }
            ExitCode::from(status)
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.file.as_deref());
    debug!(store = ?config.store_path, "Resolved configuration");

    let manager = TaskManager::new(TaskStore::new(&config.store_path));

    match cli.command {
        Commands::Add {
            description,
            due_date,
            priority,
            category,
            tags,
        } => {
            let new = NewTask {
                description,
                due_date,
                priority,
                category,
                tags,
            };
            println!("{}", manager.add(new)?);
        }
        Commands::List {
            hide_completed,
            category,
            tag,
            search,
        } => {
            let filter = ListFilter {
                show_completed: !hide_completed,
                category,
                tag,
                search,
            };
            println!("{}", manager.list(&filter));
        }
        Commands::Complete { id } => {
            println!("{}", manager.complete(&id)?);
        }
        Commands::Delete { id } => {
            println!("{}", manager.delete(&id)?);
        }
        Commands::Export { filename } => {
            let outcome = manager
                .export(&filename)
                .wrap_err_with(|| format!("Failed to export tasks to {}", filename.display()))?;
            println!("{}", outcome);
        }
        Commands::Import { filename } => {
            println!("{}", manager.import(&filename)?);
        }
    }

    Ok(())
}

//! taskstate - inspect task-list snapshots
//!
//! Reads snapshot JSON files, builds new tasks and checks sync lifecycle
//! transitions using the `taskstate` model.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use taskstate::config::Config;
use taskstate::{AppState, FilterType, SyncState, Task, TaskFactory};

#[derive(Parser)]
#[command(name = "taskstate")]
#[command(about = "Inspect task-list state snapshots")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the visible tasks of a snapshot
    Show {
        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Snapshot file (overrides config)
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// Filter to apply (ANY, ACTIVE, COMPLETE); overrides view.filter and the snapshot's own
        #[arg(short, long)]
        filter: Option<FilterType>,
    },

    /// Print a new task as JSON
    NewTask {
        /// Task title
        #[arg(short, long)]
        title: Option<String>,

        /// Task description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Check whether the sync lifecycle allows a transition
    CheckTransition {
        /// Current state, e.g. IDLE, PROCESS(REFRESH), ERROR(timeout)
        from: SyncState,

        /// Next state
        to: SyncState,
    },

    /// Initialize a new config file
    Init {
        /// Output path for config file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// `show` output
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct View<'a> {
    filter: FilterType,
    sync_state: String,
    tasks: Vec<&'a Task>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("taskstate=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show {
            config,
            snapshot,
            filter,
        } => {
            let cfg = if let Some(path) = config {
                Config::load_from(&path)?
            } else {
                Config::load()?
            };

            let path = snapshot.unwrap_or(cfg.snapshot.path);
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
            let state: AppState =
                serde_json::from_str(&content).context("Failed to parse snapshot")?;

            let filter = cfg.view.resolve_filter(filter, state.filter());
            let state = state.with_filter(filter);

            tracing::info!(
                snapshot = %path.display(),
                filter = %state.filter(),
                sync_state = %state.sync_state(),
                total = state.tasks().len(),
                "Snapshot loaded"
            );

            let view = View {
                filter: state.filter(),
                sync_state: state.sync_state().to_string(),
                tasks: state.visible_tasks().collect(),
            };
            print_json(&view, cfg.output.pretty)
        }

        Commands::NewTask { title, description } => {
            let factory = TaskFactory::system();
            let task = match title {
                Some(t) => factory.create_with(t, description.unwrap_or_default()),
                None => factory
                    .create()
                    .with_description(description.unwrap_or_default()),
            };

            let cfg = Config::load()?;
            print_json(&task, cfg.output.pretty)
        }

        Commands::CheckTransition { from, to } => {
            let label = format!("{} -> {}", from, to);
            from.transition(to)?;
            println!("{}: allowed", label);
            Ok(())
        }

        Commands::Init { output } => {
            let path = output.unwrap_or_else(|| PathBuf::from("taskstate.toml"));
            let cfg = Config::default();
            cfg.save_to(&path)?;

            println!("Created config file: {}", path.display());
            println!();
            println!("Next steps:");
            println!("  1. Point snapshot.path at a task-list snapshot");
            println!(
                "  2. Show it: TASKSTATE_CONFIG={} taskstate show",
                path.display()
            );

            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize output")?;

    println!("{}", out);
    Ok(())
}

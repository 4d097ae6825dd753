//! Scroll CLI
//!
//! Command-line interface for scroll - JSON documents on disk.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use scroll_core::{Config, Driver, Options, StoreError, TracingLogger};

mod commands;
mod logging;
mod output;
mod prompt;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "scroll")]
#[command(about = "scroll - JSON documents on disk, one file per record")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Store root directory (overrides config and SCROLL_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a record
    #[command(alias = "put")]
    Write {
        /// Collection name
        collection: String,
        /// Record key
        resource: String,
        /// Record value as JSON
        value: String,
    },
    /// Show a record
    #[command(alias = "get")]
    Read {
        /// Collection name
        collection: String,
        /// Record key
        resource: String,
    },
    /// Show every record in a collection
    #[command(alias = "ls")]
    List {
        /// Collection name
        collection: String,
    },
    /// Delete a record
    #[command(alias = "rm")]
    Delete {
        /// Collection name
        collection: String,
        /// Record key
        resource: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete a collection and all of its records
    Drop {
        /// Collection name
        collection: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Write sample users into the `hello` collection
    Seed,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, log_level, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:?}", e);
            if let Some(hint) = recovery_hint(&e) {
                eprintln!();
                eprintln!("Hint: {}", hint);
            }
            ExitCode::FAILURE
        }
    }
}

/// Suggestion attached to the first store error in the chain, if any
fn recovery_hint(err: &anyhow::Error) -> Option<&'static str> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<StoreError>())
        .and_then(StoreError::recovery_suggestion)
}

fn run(cli: Cli) -> Result<()> {
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands don't need the store
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), cli.config.as_ref(), &output);
    }

    let mut config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let level = logging::effective_level(&config);
    logging::init(&config, level);

    let options = Options::new().with_logger(TracingLogger::new(level));
    let db = Driver::open(&config.data_dir, options)
        .with_context(|| format!("Failed to open store at {:?}", config.data_dir))?;
    tracing::debug!("Store root: {}", db.root().display());

    match cli.command {
        Commands::Write {
            collection,
            resource,
            value,
        } => commands::record::write(&db, collection, resource, value, &output),
        Commands::Read {
            collection,
            resource,
        } => commands::record::read(&db, collection, resource, &output),
        Commands::List { collection } => commands::record::list(&db, collection, &output),
        Commands::Delete {
            collection,
            resource,
            yes,
        } => commands::record::delete(&db, collection, resource, yes, &output),
        Commands::Drop { collection, yes } => {
            commands::record::drop_collection(&db, collection, yes, &output)
        }
        Commands::Seed => commands::seed::run(&db, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

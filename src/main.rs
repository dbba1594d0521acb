//! duopane - A two-pane terminal file explorer with a built-in text editor.
//!
//! Usage:
//!   dp [PATH]                Launch the interactive TUI
//!   dp ls [PATH]             Print a directory listing the way the explorer shows it
//!   dp --help                Show help

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, bail};
use itertools::Itertools;
use tracing::info;
use tracing_subscriber::EnvFilter;

use duopane_core::{ListingConfig, OsFileSystem, filter_entries, list_directory};
use duopane_tui::TuiConfig;

#[derive(Parser)]
#[command(
    name = "duopane",
    version,
    about = "A two-pane terminal file explorer with a built-in text editor",
    long_about = "duopane shows a directory listing next to an editor pane.\n\n\
                  Launch the interactive TUI by running `dp [PATH]`. When PATH is \
                  a file, its directory is listed and the file is opened."
)]
struct Cli {
    /// Directory to explore or file to open (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Show hidden entries
    #[arg(short = 'a', long)]
    hidden: bool,

    /// Write a debug log to this file
    #[arg(long, value_name = "FILE", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List a directory in explorer order
    Ls {
        /// Directory to list
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Show hidden entries
        #[arg(short = 'a', long)]
        hidden: bool,

        /// Only show entries whose name contains this text
        #[arg(short, long)]
        filter: Option<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    if let Some(log_file) = &cli.log_file {
        init_logging(log_file)?;
    }

    match cli.command {
        Some(Command::Ls {
            path,
            hidden,
            filter,
            format,
        }) => {
            run_ls(path, hidden, filter.as_deref(), format)?;
        }
        None => {
            let path = cli.path.canonicalize().context("Invalid path")?;
            let config = TuiConfig::default().with_show_hidden(cli.hidden);
            duopane_tui::run_with_config(path, config)?;
        }
    }

    Ok(())
}

/// Send tracing output to `path`. The terminal belongs to the TUI, so
/// nothing is logged unless a file is given.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "logging started");

    Ok(())
}

fn run_ls(path: PathBuf, hidden: bool, filter: Option<&str>, format: OutputFormat) -> Result<()> {
    let path = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve path: {}", path.display()))?;

    if !path.is_dir() {
        bail!("Not a directory: {}", path.display());
    }

    let config = ListingConfig::new(hidden);
    let entries = list_directory(&OsFileSystem, &path, &config);
    let entries = match filter {
        Some(query) => filter_entries(&entries, query),
        None => entries,
    };

    match format {
        OutputFormat::Text => {
            println!("{}", path.display());
            println!(
                "{}",
                entries
                    .iter()
                    .map(|entry| format!("  {}", entry.display_name))
                    .join("\n")
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    Ok(())
}

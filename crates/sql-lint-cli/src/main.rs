//! sql-lint CLI tool.
//!
//! Usage:
//! ```bash
//! sql-lint check [OPTIONS] [PATHS]...
//! sql-lint check --stdin < query.sql
//! sql-lint list-rules
//! sql-lint init
//! ```

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Style linter for SQL scripts
#[derive(Parser)]
#[command(name = "sql-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "SQL_LINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint SQL files or directories
    Check(CheckArgs),

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Arguments of the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Files or directories to lint (default: current directory)
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Only report these rules (comma-separated names or codes)
    #[arg(long, value_delimiter = ',')]
    pub rules: Vec<String>,

    /// Exclude patterns (can be specified multiple times)
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// Read one statement from stdin (up to the first `;`) instead of files
    #[arg(long, conflicts_with = "paths")]
    pub stdin: bool,

    /// Print the syntax tree of every statement before linting
    #[arg(long)]
    pub print_ast: bool,
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line per diagnostic.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// Source snippets rendered through miette.
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check(args) => {
            let clean = commands::check::run(&args, cli.config.as_deref())?;
            if !clean {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}

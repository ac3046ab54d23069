//! dupless CLI tool.
//!
//! Usage:
//! ```bash
//! dupless check [OPTIONS] [PATH]
//! dupless patterns [PATH]
//! dupless init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Flags function, module and variable names matching forbidden patterns
#[derive(Parser)]
#[command(name = "dupless")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the forbidden name checks
    Check {
        /// Path to analyze (default: `analyzer.root` from the config file)
        path: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        #[command(flatten)]
        patterns: PatternArgs,

        /// Severity of reported violations (overrides the config file)
        #[arg(long)]
        severity: Option<SeverityArg>,

        /// Fail instead of skipping files that do not parse
        #[arg(long)]
        fail_on_parse_error: bool,
    },

    /// Print the effective forbidden patterns per category
    Patterns {
        /// Project directory used to find the config file
        #[arg(default_value = ".")]
        path: PathBuf,

        #[command(flatten)]
        patterns: PatternArgs,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Pattern lists given on the command line.
///
/// A non-empty list replaces the config file's list for that category.
#[derive(Debug, Default, clap::Args)]
pub struct PatternArgs {
    /// Regex forbidden in function names (can be specified multiple times)
    #[arg(long = "function-names", value_name = "REGEX")]
    pub function_names: Vec<String>,

    /// Regex forbidden in module names (can be specified multiple times)
    #[arg(long = "package-names", value_name = "REGEX")]
    pub package_names: Vec<String>,

    /// Regex forbidden in variable names (can be specified multiple times)
    #[arg(long = "variable-names", value_name = "REGEX")]
    pub variable_names: Vec<String>,
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

/// Severity accepted on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum SeverityArg {
    /// Informational, never fails the run.
    Info,
    /// Warning, never fails the run.
    Warning,
    /// Error, exits with status 1.
    Error,
}

impl From<SeverityArg> for dupless_core::Severity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Info => Self::Info,
            SeverityArg::Warning => Self::Warning,
            SeverityArg::Error => Self::Error,
        }
    }
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
        Commands::Check {
            path,
            format,
            exclude,
            patterns,
            severity,
            fail_on_parse_error,
        } => {
            let project_dir = path.clone().unwrap_or_else(|| PathBuf::from("."));
            let source = config_resolver::resolve(&project_dir, cli.config.as_deref());
            commands::check::run(
                path.as_deref(),
                format,
                exclude,
                patterns,
                severity.map(Into::into),
                fail_on_parse_error,
                &source,
            )
        }
        Commands::Patterns { path, patterns } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            commands::patterns::run(patterns, &source)
        }
        Commands::Init { force } => commands::init::run(force),
    }
}

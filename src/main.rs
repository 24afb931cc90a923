//! Binary entry point for csvboard.
//!
//! Imports CSV files into a blackboard and exports blackboard documents as
//! `name:value` text.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use csvboard::config::{RunConfig, parse_field_list, parse_flag};
use csvboard::io::parse_tag_list;
use csvboard::models::{RowLimit, RunReport};
use csvboard::observability::{self, InitOptions, LogFormat, LoggingConfig};
use std::path::PathBuf;
use std::process::ExitCode;

/// csvboard - typed CSV import and text export for a document blackboard.
#[derive(Parser)]
#[command(name = "csvboard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true, env = "CSVBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    log_json: bool,

    /// Write logs to a file instead of stderr.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Write the run report as JSON to this path.
    #[arg(long, global = true)]
    report: Option<PathBuf>,

    /// Maximum rows to import or documents to export (<= 0 is unbounded).
    #[arg(long, global = true, allow_negative_numbers = true)]
    row_limit: Option<i64>,

    /// Directory holding blackboard databases.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Import a CSV file into a blackboard.
    Import {
        /// CSV file to import.
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Blackboard to write to (`:memory:` for a throwaway store).
        #[arg(short, long)]
        blackboard: Option<String>,

        /// Tags for every imported document (comma-separated).
        #[arg(short, long)]
        tags: Option<String>,
    },

    /// Export blackboard documents as text.
    Export {
        /// Blackboard to read from.
        #[arg(short, long)]
        blackboard: Option<String>,

        /// Fields to export, in order (comma-separated; default all).
        #[arg(short, long)]
        fields: Option<String>,

        /// Text file to write; replaced on every run.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print documents to stdout (`TRUE` to enable).
        #[arg(long)]
        on_screen: Option<String>,

        /// Cut values to this many characters (<= 0 disables).
        #[arg(long, allow_negative_numbers = true)]
        truncate_at: Option<i64>,
    },

    /// Show the effective configuration.
    Config,
}

fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = init_logging(&cli, &config) {
        eprintln!("Failed to initialize observability: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

/// Builds the run configuration: file and environment, then flags.
fn load_config(cli: &Cli) -> anyhow::Result<RunConfig> {
    let mut config = RunConfig::load(cli.config.as_deref())?;

    if let Some(data_dir) = &cli.data_dir {
        config.data_dir.clone_from(data_dir);
    }
    if let Some(limit) = cli.row_limit {
        config.row_limit = RowLimit::from_raw(limit);
    }

    match &cli.command {
        Commands::Import {
            file,
            blackboard,
            tags,
        } => {
            if let Some(file) = file {
                config.import.csv_filename = Some(file.clone());
            }
            if let Some(blackboard) = blackboard {
                config.import.output_blackboard.clone_from(blackboard);
            }
            if let Some(tags) = tags {
                config.import.output_tags = parse_tag_list(tags);
            }
        },
        Commands::Export {
            blackboard,
            fields,
            output,
            on_screen,
            truncate_at,
        } => {
            if let Some(blackboard) = blackboard {
                config.export.input_blackboard.clone_from(blackboard);
            }
            if let Some(fields) = fields {
                config.export.input_fields = parse_field_list(fields);
            }
            if let Some(output) = output {
                config.export.txt_filename =
                    (!output.as_os_str().is_empty()).then(|| output.clone());
            }
            if let Some(flag) = on_screen {
                config.export.on_screen = parse_flag(flag);
            }
            if let Some(limit) = truncate_at {
                config.export.truncate_at = usize::try_from(*limit).unwrap_or(0);
            }
        },
        Commands::Config => {},
    }

    Ok(config)
}

fn init_logging(cli: &Cli, config: &RunConfig) -> csvboard::Result<()> {
    let options = InitOptions {
        verbose: cli.verbose,
    };
    if !cli.log_json && cli.log_file.is_none() {
        return observability::init_from_config(&config.logging, options);
    }

    let mut logging = LoggingConfig::from_settings(Some(&config.logging), options.verbose);
    if cli.log_json {
        logging = logging.with_format(LogFormat::Json);
    }
    if let Some(file) = &cli.log_file {
        logging = logging.with_file(file);
    }
    observability::init(logging)
}

/// Runs the selected command.
fn run_command(cli: &Cli, config: &RunConfig) -> anyhow::Result<()> {
    let report = match cli.command {
        Commands::Import { .. } => commands::cmd_import(config)?,
        Commands::Export { .. } => commands::cmd_export(config)?,
        Commands::Config => {
            commands::cmd_config(config);
            return Ok(());
        },
    };

    finish(cli, &report)
}

fn finish(cli: &Cli, report: &RunReport) -> anyhow::Result<()> {
    eprintln!("{report}");
    if let Some(path) = &cli.report {
        report
            .write_json(path)
            .with_context(|| format!("failed to write report to '{}'", path.display()))?;
    }
    Ok(())
}

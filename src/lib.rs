//! DupMerge - Duplicate File Merger
//!
//! Collapses the files of one directory in two passes: byte-identical
//! files are merged into their first-seen copy, then files sharing a name
//! prefix are merged into the first file of their group. Every file that
//! absorbs another has its repeated lines removed.

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod scanner;

use anyhow::{bail, Context, Result};
use clap::CommandFactory;
use yansi::Paint;

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::duplicates::{ConsolidateConfig, Consolidator};
use crate::error::ExitCode;
use crate::logging::LogStream;

/// Run the application for parsed command-line arguments.
///
/// # Errors
///
/// Returns an error if the configuration can't be loaded or the target
/// directory can't be listed. Failures of individual merge, removal or
/// dedup steps are not errors; they are logged and listed in the report.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let json = cli.output == OutputFormat::Json;
    let stream = if json {
        LogStream::Stderr
    } else {
        LogStream::Stdout
    };
    logging::init_logging(cli.verbose, cli.quiet, stream);

    if cli.no_color || json {
        yansi::disable();
    }

    if cli.path.is_none() && !cli.print_config {
        Cli::command()
            .print_help()
            .context("cannot print usage")?;
        println!();
        return Ok(ExitCode::Success);
    }

    if let Some(path) = &cli.config {
        if !path.is_file() {
            bail!("config file not found: {}", path.display());
        }
    }
    let mut config = Config::load(cli.config.as_deref()).context("invalid configuration")?;
    config.apply_cli(&cli);
    log::debug!("Effective configuration: {:?}", config);

    let dir = match cli.path.as_deref() {
        Some(dir) if !cli.print_config => dir,
        _ => {
            print!("{}", config.to_toml().context("cannot render configuration")?);
            return Ok(ExitCode::Success);
        }
    };

    let consolidator = Consolidator::new(ConsolidateConfig::from(&config));
    let report = consolidator
        .run(dir)
        .with_context(|| format!("cannot scan {}", dir.display()))?;

    match cli.output {
        OutputFormat::Text => {
            println!("{}", "Duplicate file cleanup complete.".green().bold());
            if report.all_succeeded() {
                println!("{}", report.summary());
            } else {
                println!("{}", report.summary().yellow());
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("cannot serialize report")?;
            println!("{json}");
        }
    }

    Ok(ExitCode::Success)
}

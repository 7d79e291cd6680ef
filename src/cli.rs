//! Command-line interface definitions for DupMerge.
//!
//! This module defines all CLI arguments using the clap derive API. Every
//! option except the directory can also be set in the config file or the
//! environment (see [`crate::config`]); flags given here win.
//!
//! # Example
//!
//! ```bash
//! # Merge duplicates in a directory
//! dupmerge ~/notes
//!
//! # Use SHA-256 and keep the raw directory order
//! dupmerge --algorithm sha256 --unsorted ~/notes
//!
//! # Move removed files to the trash, print a JSON report
//! dupmerge --trash --output json ~/notes
//!
//! # Verbose mode for debugging
//! dupmerge -v ~/notes
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::scanner::HashAlgorithm;

/// Merge duplicate and same-prefix files in a directory.
///
/// Byte-identical files are merged into the first one found. Files whose
/// names share the text before the first underscore are then merged into
/// the first of their group. Every merged file has its repeated lines
/// removed.
#[derive(Debug, Parser)]
#[command(name = "dupmerge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory whose files should be merged (non-recursive)
    #[arg(value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Path to a TOML config file
    ///
    /// If not specified, a default platform-specific path is used.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Content hash algorithm
    #[arg(long, value_enum)]
    pub algorithm: Option<HashAlgorithm>,

    /// Longest line accepted when removing duplicate lines (e.g., 64KiB, 1MB)
    ///
    /// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB
    #[arg(long, value_name = "SIZE", value_parser = parse_size)]
    pub max_line_length: Option<u64>,

    /// Keep the directory's enumeration order instead of sorting by name
    ///
    /// The first file of a group absorbs the others, so this changes which
    /// file survives.
    #[arg(long)]
    pub unsorted: bool,

    /// Remove leftover NAME.tmp files (when NAME exists) before scanning
    #[arg(long)]
    pub clean_temp: bool,

    /// Move removed files to the system trash instead of deleting them
    #[arg(long)]
    pub trash: bool,

    /// Character that ends the file name prefix (default: _)
    #[arg(long, value_name = "CHAR")]
    pub separator: Option<char>,

    /// Format of the completion summary
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

/// Output format for the completion summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One human-readable line
    Text,
    /// Full run report as JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Parse a human-readable size string into bytes.
///
/// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB
/// Case-insensitive. Numbers without suffix are treated as bytes.
///
/// # Examples
///
/// ```
/// use dupmerge::cli::parse_size;
///
/// assert_eq!(parse_size("1024").unwrap(), 1024);
/// assert_eq!(parse_size("64KiB").unwrap(), 65_536);
/// assert_eq!(parse_size("1MB").unwrap(), 1_000_000);
/// assert_eq!(parse_size("1MiB").unwrap(), 1_048_576);
/// ```
/// # Errors
///
/// Returns an error if the string is empty, contains an invalid number,
/// a negative number, or an unknown size suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }

    // Find where the number ends and the suffix begins
    let (num_str, suffix) = match s.find(|c: char| !c.is_ascii_digit() && c != '.') {
        Some(idx) => (&s[..idx], s[idx..].trim().to_uppercase()),
        None => (s, String::new()),
    };

    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number: '{num_str}'"))?;

    let multiplier: u64 = match suffix.as_str() {
        "" | "B" => 1,
        "KB" | "K" => 1_000,
        "KIB" => 1_024,
        "MB" | "M" => 1_000_000,
        "MIB" => 1_048_576,
        "GB" | "G" => 1_000_000_000,
        "GIB" => 1_073_741_824,
        _ => return Err(format!("Unknown size suffix: '{suffix}'")),
    };

    Ok((num * multiplier as f64) as u64)
}

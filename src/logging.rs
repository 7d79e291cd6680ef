//! Log setup for the `log` facade, backed by `env_logger`.
//!
//! Progress lines (merges, removals, line dedups) and skipped-step
//! diagnostics are ordinary log records. By default they go to stdout next
//! to the completion summary. When stdout carries a machine-readable
//! document the caller routes them to stderr instead.
//!
//! `RUST_LOG` wins over `-q`/`-v` when it is set.

use env_logger::{Builder, Target};
use log::LevelFilter;
use std::env;
use std::io::Write;

/// Where log records are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogStream {
    /// Standard output, shared with the text summary.
    #[default]
    Stdout,
    /// Standard error, leaving stdout to the JSON report.
    Stderr,
}

impl From<LogStream> for Target {
    fn from(stream: LogStream) -> Self {
        match stream {
            LogStream::Stdout => Target::Stdout,
            LogStream::Stderr => Target::Stderr,
        }
    }
}

/// Install the global logger. Must be called at most once per process.
///
/// `verbose` is the `-v` count (debug at 1, trace from 2); `quiet` limits
/// output to errors.
///
/// ```rust,no_run
/// use dupmerge::logging::{init_logging, LogStream};
///
/// init_logging(1, false, LogStream::Stderr);
/// log::debug!("goes to stderr");
/// ```
pub fn init_logging(verbose: u8, quiet: bool, stream: LogStream) {
    let mut builder = Builder::new();
    builder.target(stream.into());

    let from_env = env::var("RUST_LOG").is_ok();
    if from_env {
        builder.parse_default_env();
    } else {
        builder.filter_level(level_for(verbose, quiet));
    }
    configure_format(&mut builder, verbose);
    builder.init();

    if !from_env {
        log::debug!("Log level {} on {:?}", level_for(verbose, quiet), stream);
    }
}

fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    }
}

// Debug builds stamp each record; -v adds the emitting module.
fn configure_format(builder: &mut Builder, verbose: u8) {
    #[cfg(debug_assertions)]
    builder.format(move |buf, record| {
        let style = buf.default_level_style(record.level());
        write!(
            buf,
            "{} {style}{:<5}{style:#} ",
            buf.timestamp_seconds(),
            record.level()
        )?;
        if verbose > 0 {
            write!(buf, "[{}] ", record.module_path().unwrap_or("unknown"))?;
        }
        writeln!(buf, "{}", record.args())
    });

    #[cfg(not(debug_assertions))]
    {
        let _ = verbose;
        builder.format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(buf, "{style}{:<5}{style:#} {}", record.level(), record.args())
        });
    }
}

//! File actions module.
//!
//! This module provides the file-mutating primitives the merge passes are
//! built from:
//! - Appending one file onto another ([`merge`])
//! - Rewriting a file with duplicate lines removed ([`dedup`])
//! - Removing a file, permanently or to the system trash ([`delete`])
//!
//! Every primitive returns a `Result` and never logs failures itself; the
//! resolvers decide whether a failure skips a file or aborts a group.
//!
//! # Example
//!
//! ```no_run
//! use dupmerge::actions::{append_file, remove_file, DeleteMode, LineDeduplicator};
//! use std::path::Path;
//!
//! let dest = Path::new("notes_1.txt");
//! let src = Path::new("notes_2.txt");
//!
//! append_file(dest, src).unwrap();
//! remove_file(src, DeleteMode::Permanent).unwrap();
//! LineDeduplicator::default().dedup_file(dest).unwrap();
//! ```

pub mod dedup;
pub mod delete;
pub mod merge;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

// Re-export commonly used types
pub use dedup::{temp_path_for, DedupStats, LineDeduplicator, DEFAULT_MAX_LINE_LENGTH, TEMP_SUFFIX};
pub use delete::{remove_file, DeleteMode, DeleteResult};
pub use merge::{append_file, MergeResult};

/// Error type for file actions.
#[derive(Debug, Error)]
pub enum ActionError {
    /// File was not found (may have been removed earlier in the run).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when opening, writing or removing a file.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// A line exceeded the configured maximum line length.
    #[error("line {line} of {path} is longer than {limit} bytes")]
    LineTooLong {
        path: PathBuf,
        line: usize,
        limit: usize,
    },

    /// Replacing the original with the rewritten temporary file failed.
    #[error("failed to replace {path} with {temp}: {source}")]
    Replace {
        path: PathBuf,
        temp: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Trash operation failed.
    #[error("trash operation failed for {path}: {message}")]
    TrashFailed { path: PathBuf, message: String },

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ActionError {
    /// Classify an I/O error against the path it occurred on.
    pub(crate) fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p)
            | Self::PermissionDenied(p)
            | Self::LineTooLong { path: p, .. }
            | Self::Replace { path: p, .. }
            | Self::TrashFailed { path: p, .. }
            | Self::Io { path: p, .. } => p,
        }
    }
}

//! Scanner module for directory listing and content hashing.
//!
//! This module provides the two collaborators the merge passes rely on:
//! - A flat, non-recursive directory listing of regular files
//! - Content hashing with BLAKE3 or SHA-256
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`lister`]: Single-directory file discovery
//! - [`hasher`]: Streaming content hasher
//!
//! # Example
//!
//! ```no_run
//! use dupmerge::scanner::{Hasher, Lister, ListerConfig};
//! use std::path::Path;
//!
//! let lister = Lister::new(Path::new("."), ListerConfig::default());
//! let hasher = Hasher::new();
//! for entry in lister.list().unwrap() {
//!     match hasher.hash_file(&entry.path) {
//!         Ok(hash) => println!("{}  {}", hash, entry.name),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod hasher;
pub mod lister;

use std::path::{Path, PathBuf};

// Re-export main types
pub use hasher::{ContentHash, HashAlgorithm, Hasher, DEFAULT_BUFFER_SIZE};
pub use lister::{Lister, ListerConfig};

/// A regular file found directly inside the target directory.
///
/// Entries are derived fresh on every run and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Full path to the file
    pub path: PathBuf,
    /// File name (lossily converted for prefix grouping)
    pub name: String,
}

impl FileEntry {
    /// Create a new FileEntry from a path, deriving the name from its last component.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }

    /// Whether the file still exists as a regular file.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

/// Errors that can occur while listing the target directory.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing the directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while reading the directory.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    pub(crate) fn from_io(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    pub(crate) fn from_io(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

//! Flat directory listing using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Lister`] struct, which collects the regular
//! files sitting directly inside one directory. It never descends into
//! subdirectories and never follows symbolic links: subdirectories,
//! symlinks and special files are skipped.
//!
//! Entries come back sorted by file name unless sorting is disabled, in
//! which case they keep the order the operating system enumerates them in.
//! "First seen" in the merge passes means first in this list.
//!
//! # Example
//!
//! ```no_run
//! use dupmerge::scanner::{Lister, ListerConfig};
//! use std::path::Path;
//!
//! let lister = Lister::new(Path::new("/tmp/inbox"), ListerConfig::default());
//! let files = lister.list().unwrap();
//! println!("Found {} files", files.len());
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{FileEntry, ScanError};

/// Configuration for directory listing.
#[derive(Debug, Clone)]
pub struct ListerConfig {
    /// Sort entries by file name (byte order) instead of enumeration order.
    pub sort_entries: bool,
}

impl Default for ListerConfig {
    fn default() -> Self {
        Self { sort_entries: true }
    }
}

impl ListerConfig {
    /// Enable/disable file name sorting.
    #[must_use]
    pub fn with_sort_entries(mut self, sort: bool) -> Self {
        self.sort_entries = sort;
        self
    }
}

/// Lists regular files directly inside a directory.
#[derive(Debug)]
pub struct Lister {
    /// Directory to list
    root: PathBuf,
    /// Lister configuration
    config: ListerConfig,
}

impl Lister {
    /// Create a new lister for the given directory.
    #[must_use]
    pub fn new(path: &Path, config: ListerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// The directory being listed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List the regular files in the directory.
    ///
    /// Unreadable individual entries are logged and skipped.
    ///
    /// # Errors
    ///
    /// Fails only if the directory itself is missing, is not a directory,
    /// or cannot be read.
    pub fn list(&self) -> Result<Vec<FileEntry>, ScanError> {
        let metadata = fs::metadata(&self.root).map_err(|e| ScanError::from_io(&self.root, e))?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory(self.root.clone()));
        }

        let mut walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);
        if self.config.sort_entries {
            walker = walker.sort_by_file_name();
        }

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(self.convert_error(e)),
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                log::trace!("Skipping subdirectory: {}", entry.path().display());
                continue;
            }
            if file_type.is_symlink() {
                log::trace!("Skipping symlink: {}", entry.path().display());
                continue;
            }
            if !file_type.is_file() {
                log::trace!("Skipping special file: {}", entry.path().display());
                continue;
            }

            files.push(FileEntry::new(entry.into_path()));
        }

        log::debug!("Listed {} files in {}", files.len(), self.root.display());
        Ok(files)
    }

    fn convert_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);
        let message = error.to_string();
        match error.into_io_error() {
            Some(io) => ScanError::from_io(&path, io),
            None => ScanError::Io {
                path,
                source: std::io::Error::other(message),
            },
        }
    }
}

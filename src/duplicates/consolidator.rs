//! Consolidator that runs both merge passes over one directory.
//!
//! # Overview
//!
//! A run goes through these steps:
//! 1. **List** - collect the regular files directly inside the directory
//! 2. **Clean** (optional) - remove `<name>.tmp` leftovers whose `<name>` exists
//! 3. **Pass 1** - merge byte-identical files ([`ExactDuplicateResolver`])
//! 4. **Pass 2** - merge same-prefix files ([`PrefixGroupResolver`])
//!
//! Only a failure to list the directory stops the run. Everything else is
//! recorded in the returned [`RunReport`] and the run carries on.
//!
//! # Example
//!
//! ```no_run
//! use dupmerge::duplicates::{ConsolidateConfig, Consolidator};
//! use std::path::Path;
//!
//! let config = ConsolidateConfig::default().with_sort_entries(true);
//! let consolidator = Consolidator::new(config);
//!
//! let report = consolidator.run(Path::new("/some/path")).unwrap();
//! println!("{}", report.summary());
//! ```

use std::collections::HashSet;
use std::path::Path;

use crate::actions::{DeleteMode, LineDeduplicator, DEFAULT_MAX_LINE_LENGTH, TEMP_SUFFIX};
use crate::config::Config;
use crate::scanner::{FileEntry, HashAlgorithm, Hasher, Lister, ListerConfig, ScanError};

use super::exact::ExactDuplicateResolver;
use super::groups::DEFAULT_PREFIX_SEPARATOR;
use super::prefix::PrefixGroupResolver;
use super::report::{RemovalReason, RunReport};
use super::Toolkit;

/// Configuration for a consolidation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidateConfig {
    /// Content hash algorithm.
    pub algorithm: HashAlgorithm,
    /// Longest line the deduplicator accepts, in bytes.
    pub max_line_length: usize,
    /// Sort the listing by file name.
    pub sort_entries: bool,
    /// Remove stale `.tmp` files before scanning.
    pub clean_temp_files: bool,
    /// How removed files are disposed of.
    pub delete_mode: DeleteMode,
    /// Character that ends a file name prefix.
    pub prefix_separator: char,
}

impl Default for ConsolidateConfig {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::default(),
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            sort_entries: true,
            clean_temp_files: false,
            delete_mode: DeleteMode::default(),
            prefix_separator: DEFAULT_PREFIX_SEPARATOR,
        }
    }
}

impl From<&Config> for ConsolidateConfig {
    fn from(config: &Config) -> Self {
        Self {
            algorithm: config.algorithm,
            max_line_length: config.max_line_length,
            sort_entries: config.sort_entries,
            clean_temp_files: config.clean_temp_files,
            delete_mode: DeleteMode::from_use_trash(config.use_trash),
            prefix_separator: config.prefix_separator,
        }
    }
}

impl ConsolidateConfig {
    /// Set the hash algorithm.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the maximum line length.
    #[must_use]
    pub fn with_max_line_length(mut self, max: usize) -> Self {
        self.max_line_length = max;
        self
    }

    /// Enable/disable sorting of the listing.
    #[must_use]
    pub fn with_sort_entries(mut self, sort: bool) -> Self {
        self.sort_entries = sort;
        self
    }

    /// Enable/disable stale temp file cleanup.
    #[must_use]
    pub fn with_clean_temp_files(mut self, clean: bool) -> Self {
        self.clean_temp_files = clean;
        self
    }

    /// Set the removal mode.
    #[must_use]
    pub fn with_delete_mode(mut self, mode: DeleteMode) -> Self {
        self.delete_mode = mode;
        self
    }

    /// Set the prefix separator.
    #[must_use]
    pub fn with_prefix_separator(mut self, separator: char) -> Self {
        self.prefix_separator = separator;
        self
    }
}

/// Runs the listing and both merge passes over a directory.
#[derive(Debug)]
pub struct Consolidator {
    config: ConsolidateConfig,
    toolkit: Toolkit,
}

impl Consolidator {
    /// Create a consolidator with the given configuration.
    #[must_use]
    pub fn new(config: ConsolidateConfig) -> Self {
        let toolkit = Toolkit {
            hasher: Hasher::new().with_algorithm(config.algorithm),
            deduplicator: LineDeduplicator::new(config.max_line_length),
            delete_mode: config.delete_mode,
        };
        Self { config, toolkit }
    }

    /// Create a consolidator with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ConsolidateConfig::default())
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ConsolidateConfig {
        &self.config
    }

    /// Consolidate the files in `dir`.
    ///
    /// # Errors
    ///
    /// Returns `ScanError` if the directory does not exist, is not a
    /// directory, or cannot be read. No file has been touched in that case.
    pub fn run(&self, dir: &Path) -> Result<RunReport, ScanError> {
        let mut report = RunReport::new(dir);

        let lister = Lister::new(
            dir,
            ListerConfig::default().with_sort_entries(self.config.sort_entries),
        );
        let mut files = lister.list()?;
        log::info!("Found {} file(s) in {}", files.len(), dir.display());

        if self.config.clean_temp_files {
            files = self.clean_stale_temp_files(files, &mut report);
        }
        report.files_scanned = files.len();

        let hashed = ExactDuplicateResolver::new(&self.toolkit).run(&files, &mut report);
        PrefixGroupResolver::new(&self.toolkit, self.config.prefix_separator)
            .run(&hashed, &mut report);

        log::debug!(
            "{} exact group(s), {} prefix group(s)",
            report.exact_groups,
            report.prefix_groups
        );
        Ok(report)
    }

    /// Remove stale temp files and return the rest of the listing.
    fn clean_stale_temp_files(
        &self,
        files: Vec<FileEntry>,
        report: &mut RunReport,
    ) -> Vec<FileEntry> {
        let stale = stale_temp_files(&files);
        if stale.is_empty() {
            return files;
        }

        for entry in &stale {
            self.toolkit
                .remove(&entry.path, RemovalReason::StaleTempFile, report);
        }
        files.into_iter().filter(|f| !stale.contains(f)).collect()
    }
}

/// Files named `<name>.tmp` where `<name>` is also in `files`.
///
/// These are what an interrupted line deduplication leaves behind.
#[must_use]
pub fn stale_temp_files(files: &[FileEntry]) -> Vec<FileEntry> {
    let names: HashSet<&str> = files.iter().map(|f| f.name.as_str()).collect();
    files
        .iter()
        .filter(|f| {
            f.name
                .strip_suffix(TEMP_SUFFIX)
                .is_some_and(|original| names.contains(original))
        })
        .cloned()
        .collect()
}

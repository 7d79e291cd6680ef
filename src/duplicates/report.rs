//! Run report: what each pass did and what it skipped.
//!
//! Every completed step is recorded as an [`Action`] and every skipped step
//! as a [`Failure`], in the order they happened. Recording also emits the
//! matching log line, so the console shows progress as the run goes.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Why a file was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalReason {
    /// Its bytes were appended to the canonical file of its hash group.
    ExactDuplicate,
    /// Its bytes were appended to its prefix group's representative.
    MergedIntoRepresentative,
    /// It hashed equal to its prefix group's representative; nothing was appended.
    IdenticalToRepresentative,
    /// A `.tmp` leftover from an interrupted rewrite.
    StaleTempFile,
}

/// A completed file-system mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// `source` was appended onto `destination`.
    Merged {
        source: PathBuf,
        destination: PathBuf,
        bytes: u64,
    },
    /// `path` was removed.
    Removed { path: PathBuf, reason: RemovalReason },
    /// `path` was rewritten with repeated lines dropped.
    Deduplicated {
        path: PathBuf,
        lines_kept: usize,
        lines_dropped: usize,
    },
}

impl Action {
    /// The file this action changed (the destination, for merges).
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Merged { destination, .. } => destination,
            Self::Removed { path, .. } | Self::Deduplicated { path, .. } => path,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Merged {
                source,
                destination,
                bytes,
            } => write!(
                f,
                "Merged {} into {} ({} bytes)",
                source.display(),
                destination.display(),
                bytes
            ),
            Self::Removed { path, reason } => match reason {
                RemovalReason::ExactDuplicate => {
                    write!(f, "Removed duplicate file {}", path.display())
                }
                RemovalReason::MergedIntoRepresentative => {
                    write!(f, "Removed file {} after merging", path.display())
                }
                RemovalReason::IdenticalToRepresentative => {
                    write!(f, "Removed identical file {}", path.display())
                }
                RemovalReason::StaleTempFile => {
                    write!(f, "Removed stale temporary file {}", path.display())
                }
            },
            Self::Deduplicated {
                path,
                lines_kept,
                lines_dropped,
            } => write!(
                f,
                "Removed {} duplicate line(s) from {} ({} kept)",
                lines_dropped,
                path.display(),
                lines_kept
            ),
        }
    }
}

/// The kind of step that was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Hash,
    Merge,
    Remove,
    Dedup,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Hash => write!(f, "hashing"),
            Step::Merge => write!(f, "merge"),
            Step::Remove => write!(f, "removal"),
            Step::Dedup => write!(f, "line deduplication"),
        }
    }
}

/// A step that failed and was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    /// What was being attempted
    pub step: Step,
    /// File the step was acting on
    pub path: PathBuf,
    /// Error message
    pub message: String,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.step, self.message)
    }
}

/// Everything a run did, in order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Directory that was processed
    pub directory: PathBuf,
    /// Regular files found by the listing
    pub files_scanned: usize,
    /// Exact-duplicate groups processed
    pub exact_groups: usize,
    /// Prefix groups with more than one surviving member
    pub prefix_groups: usize,
    /// Completed mutations
    pub actions: Vec<Action>,
    /// Skipped steps
    pub failures: Vec<Failure>,
}

impl RunReport {
    /// Create an empty report for `directory`.
    #[must_use]
    pub fn new(directory: &Path) -> Self {
        Self {
            directory: directory.to_path_buf(),
            ..Self::default()
        }
    }

    /// Record a completed action and log it.
    pub fn record(&mut self, action: Action) {
        log::info!("{}", action);
        self.actions.push(action);
    }

    /// Record a skipped step and log it.
    pub fn fail(&mut self, step: Step, path: &Path, error: &dyn fmt::Display) {
        let failure = Failure {
            step,
            path: path.to_path_buf(),
            message: error.to_string(),
        };
        log::error!("{}", failure);
        self.failures.push(failure);
    }

    /// Number of merges performed.
    #[must_use]
    pub fn merged_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, Action::Merged { .. }))
            .count()
    }

    /// Number of files removed.
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, Action::Removed { .. }))
            .count()
    }

    /// Number of line deduplications performed.
    #[must_use]
    pub fn deduplicated_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, Action::Deduplicated { .. }))
            .count()
    }

    /// Total bytes appended by merges.
    #[must_use]
    pub fn bytes_merged(&self) -> u64 {
        self.actions
            .iter()
            .map(|a| match a {
                Action::Merged { bytes, .. } => *bytes,
                _ => 0,
            })
            .sum()
    }

    /// Number of skipped steps.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Whether every attempted step succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable one-line summary.
    #[must_use]
    pub fn summary(&self) -> String {
        let base = format!(
            "Scanned {} file(s): merged {} ({}), removed {}, deduplicated {}",
            self.files_scanned,
            self.merged_count(),
            bytesize::ByteSize::b(self.bytes_merged()),
            self.removed_count(),
            self.deduplicated_count()
        );
        if self.all_succeeded() {
            base
        } else {
            format!("{}, {} step(s) failed", base, self.failure_count())
        }
    }
}

//! Duplicate consolidation module.
//!
//! This module provides functionality for:
//! - Hash and prefix grouping ([`groups`])
//! - Merging byte-identical files (Pass 1, [`exact`])
//! - Merging files that share a name prefix (Pass 2, [`prefix`])
//! - Recording what happened ([`report`])
//! - Running both passes over one directory ([`consolidator`])

pub mod consolidator;
pub mod exact;
pub mod groups;
pub mod prefix;
pub mod report;

use std::path::Path;

use crate::actions::{append_file, remove_file, DeleteMode, LineDeduplicator};
use crate::scanner::Hasher;

pub use consolidator::{ConsolidateConfig, Consolidator};
pub use exact::{ExactDuplicateResolver, HashScan};
pub use groups::{
    group_by_hash, group_by_prefix, prefix_of, DuplicateGroup, DuplicateGroups, HashIndex,
    PrefixGroup, PrefixGroups, DEFAULT_PREFIX_SEPARATOR,
};
pub use prefix::{MemberOutcome, PrefixGroupResolver};
pub use report::{Action, Failure, RemovalReason, RunReport, Step};

/// The file operations both passes share, configured once per run.
#[derive(Debug, Clone, Default)]
pub struct Toolkit {
    /// Content hasher
    pub hasher: Hasher,
    /// In-place line deduplicator
    pub deduplicator: LineDeduplicator,
    /// How merged-away files are removed
    pub delete_mode: DeleteMode,
}

impl Toolkit {
    /// Append `source` onto `destination`, recording the outcome.
    ///
    /// Returns `false` if the merge failed; `source` is then left in place.
    pub(crate) fn merge(&self, destination: &Path, source: &Path, report: &mut RunReport) -> bool {
        log::debug!(
            "Merging {} into {}",
            source.display(),
            destination.display()
        );
        match append_file(destination, source) {
            Ok(merged) => {
                report.record(Action::Merged {
                    source: merged.source,
                    destination: merged.destination,
                    bytes: merged.bytes,
                });
                true
            }
            Err(e) => {
                report.fail(Step::Merge, source, &e);
                false
            }
        }
    }

    /// Remove `path`, recording the outcome.
    pub(crate) fn remove(&self, path: &Path, reason: RemovalReason, report: &mut RunReport) -> bool {
        match remove_file(path, self.delete_mode) {
            Ok(removed) => {
                report.record(Action::Removed {
                    path: removed.path,
                    reason,
                });
                true
            }
            Err(e) => {
                report.fail(Step::Remove, path, &e);
                false
            }
        }
    }

    /// Deduplicate the lines of `path` in place, recording the outcome.
    pub(crate) fn dedup(&self, path: &Path, report: &mut RunReport) -> bool {
        log::debug!("Removing duplicate lines from {}", path.display());
        match self.deduplicator.dedup_file(path) {
            Ok(stats) => {
                report.record(Action::Deduplicated {
                    path: path.to_path_buf(),
                    lines_kept: stats.lines_kept,
                    lines_dropped: stats.lines_dropped(),
                });
                true
            }
            Err(e) => {
                report.fail(Step::Dedup, path, &e);
                false
            }
        }
    }
}

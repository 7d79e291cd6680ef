//! Pass 1: merge byte-identical files.
//!
//! # Overview
//!
//! Every listed file is hashed once. The first file seen with a given hash
//! is canonical; later files with the same hash are its duplicates. For
//! each group, every duplicate is appended onto the canonical file and then
//! removed, and finally the canonical file's lines are deduplicated once.
//!
//! Failures never abort the pass:
//! - A file that can't be hashed is left out of every group.
//! - A duplicate that can't be merged is kept and the group moves on.
//! - A failed removal is reported; the merged bytes stay merged.
//! - Dedup runs even if some merges in the group failed.
//!
//! Equal hashes are taken as equal content. There is no byte-by-byte check.

use crate::scanner::{ContentHash, FileEntry};

use super::groups::{group_by_hash, DuplicateGroup, DuplicateGroups, HashIndex};
use super::report::{RemovalReason, RunReport, Step};
use super::Toolkit;

/// Outcome of hashing the listing.
#[derive(Debug, Clone, Default)]
pub struct HashScan {
    /// Files that hashed successfully, in listing order
    pub hashed: Vec<FileEntry>,
    /// Content hash → canonical file
    pub index: HashIndex,
    /// Canonical file → identical files
    pub groups: DuplicateGroups,
}

/// Merges files with identical content into their first-seen copy.
#[derive(Debug)]
pub struct ExactDuplicateResolver<'a> {
    toolkit: &'a Toolkit,
}

impl<'a> ExactDuplicateResolver<'a> {
    /// Create a resolver using the given operations.
    #[must_use]
    pub fn new(toolkit: &'a Toolkit) -> Self {
        Self { toolkit }
    }

    /// Hash `files` and group them by content.
    pub fn scan(&self, files: &[FileEntry], report: &mut RunReport) -> HashScan {
        let mut pairs: Vec<(FileEntry, ContentHash)> = Vec::with_capacity(files.len());

        for file in files {
            match self.toolkit.hasher.hash_file(&file.path) {
                Ok(hash) => {
                    log::debug!("{}  {}", hash, file.name);
                    pairs.push((file.clone(), hash));
                }
                Err(e) => report.fail(Step::Hash, &file.path, &e),
            }
        }

        let hashed = pairs.iter().map(|(file, _)| file.clone()).collect();
        let (index, groups) = group_by_hash(pairs);
        log::debug!(
            "{} distinct contents, {} duplicate group(s)",
            index.len(),
            groups.len()
        );

        HashScan {
            hashed,
            index,
            groups,
        }
    }

    /// Merge every group's duplicates into its canonical file.
    pub fn resolve(&self, groups: &DuplicateGroups, report: &mut RunReport) {
        for group in groups {
            report.exact_groups += 1;
            self.resolve_group(group, report);
        }
    }

    /// Merge one group's duplicates into its canonical file, then
    /// deduplicate the canonical file's lines.
    pub fn resolve_group(&self, group: &DuplicateGroup, report: &mut RunReport) {
        let canonical = &group.canonical.path;

        for duplicate in &group.duplicates {
            if !self.toolkit.merge(canonical, &duplicate.path, report) {
                continue;
            }
            self.toolkit
                .remove(&duplicate.path, RemovalReason::ExactDuplicate, report);
        }

        self.toolkit.dedup(canonical, report);
    }

    /// Scan and resolve in one step.
    ///
    /// Returns the files that hashed successfully, in listing order; some
    /// of them may have been removed by the time this returns.
    pub fn run(&self, files: &[FileEntry], report: &mut RunReport) -> Vec<FileEntry> {
        let scan = self.scan(files, report);
        self.resolve(&scan.groups, report);
        scan.hashed
    }
}

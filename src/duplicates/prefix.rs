//! Pass 2: merge files that share a name prefix.
//!
//! # Overview
//!
//! Files still present after Pass 1 are grouped by the text before the
//! first separator in their names. In each group with two or more members
//! the first member is the representative, and every later member is
//! compared with it by hash:
//!
//! ```text
//! Pending ──hash equal──▶ Identical: member removed, nothing appended
//!    │
//!    └───hash differs──▶ Absorbed: member appended, removed,
//!                        representative's lines deduplicated
//! ```
//!
//! The representative is re-hashed for every member because each
//! absorption changes its content. A member whose hash or merge step
//! fails is skipped and stays on disk; the rest of the group still runs.

use crate::scanner::FileEntry;

use super::groups::{group_by_prefix, PrefixGroup};
use super::report::{RemovalReason, RunReport, Step};
use super::Toolkit;

/// What happened to one non-representative member of a prefix group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberOutcome {
    /// Same content as the representative; the member was removed.
    Identical,
    /// Different content; appended to the representative and removed.
    Absorbed,
    /// A step failed and the member was left as it was.
    Skipped,
}

/// Folds same-prefix files into the first member of their group.
#[derive(Debug)]
pub struct PrefixGroupResolver<'a> {
    toolkit: &'a Toolkit,
    separator: char,
}

impl<'a> PrefixGroupResolver<'a> {
    /// Create a resolver grouping on `separator`.
    #[must_use]
    pub fn new(toolkit: &'a Toolkit, separator: char) -> Self {
        Self { toolkit, separator }
    }

    /// Group the files of `files` that still exist and resolve every group
    /// with more than one member.
    pub fn run(&self, files: &[FileEntry], report: &mut RunReport) {
        let remaining = files.iter().filter(|f| f.exists()).cloned();
        let groups = group_by_prefix(remaining, self.separator);

        for group in groups.mergeable() {
            report.prefix_groups += 1;
            self.resolve_group(group, report);
        }
    }

    /// Resolve one group, returning the outcome for each member after the first.
    pub fn resolve_group(&self, group: &PrefixGroup, report: &mut RunReport) -> Vec<MemberOutcome> {
        let Some((representative, rest)) = group.members.split_first() else {
            return Vec::new();
        };
        log::debug!(
            "Prefix group '{}': {} member(s), representative {}",
            group.prefix,
            group.len(),
            representative.name
        );

        rest.iter()
            .map(|member| self.absorb(representative, member, report))
            .collect()
    }

    fn absorb(
        &self,
        representative: &FileEntry,
        member: &FileEntry,
        report: &mut RunReport,
    ) -> MemberOutcome {
        let hasher = &self.toolkit.hasher;

        let member_hash = match hasher.hash_file(&member.path) {
            Ok(hash) => hash,
            Err(e) => {
                report.fail(Step::Hash, &member.path, &e);
                return MemberOutcome::Skipped;
            }
        };
        let representative_hash = match hasher.hash_file(&representative.path) {
            Ok(hash) => hash,
            Err(e) => {
                report.fail(Step::Hash, &representative.path, &e);
                return MemberOutcome::Skipped;
            }
        };

        if member_hash == representative_hash {
            return if self.toolkit.remove(
                &member.path,
                RemovalReason::IdenticalToRepresentative,
                report,
            ) {
                MemberOutcome::Identical
            } else {
                MemberOutcome::Skipped
            };
        }

        if !self
            .toolkit
            .merge(&representative.path, &member.path, report)
        {
            return MemberOutcome::Skipped;
        }
        self.toolkit.remove(
            &member.path,
            RemovalReason::MergedIntoRepresentative,
            report,
        );
        self.toolkit.dedup(&representative.path, report);
        MemberOutcome::Absorbed
    }
}

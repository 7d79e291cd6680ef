//! Hash and prefix grouping.
//!
//! # Overview
//!
//! This module holds the short-lived maps a run builds over the directory
//! listing:
//!
//! - [`HashIndex`]: content hash → canonical (first-seen) file
//! - [`DuplicateGroups`]: canonical file → files with identical content
//! - [`PrefixGroups`]: file name prefix → files sharing it
//!
//! All three are built fresh for every run and owned by the caller. Groups
//! keep insertion order, so iteration follows the listing order of each
//! group's first member.
//!
//! # Example
//!
//! ```
//! use dupmerge::duplicates::group_by_prefix;
//! use dupmerge::scanner::FileEntry;
//! use std::path::PathBuf;
//!
//! let files = vec![
//!     FileEntry::new(PathBuf::from("/d/a_1.txt")),
//!     FileEntry::new(PathBuf::from("/d/a_2.txt")),
//!     FileEntry::new(PathBuf::from("/d/b_1.txt")),
//! ];
//!
//! let groups = group_by_prefix(files, '_');
//! assert_eq!(groups.len(), 2);
//! assert_eq!(groups.get("a").unwrap().len(), 2);
//! assert_eq!(groups.mergeable().count(), 1);
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use crate::scanner::{ContentHash, FileEntry};

/// Default separator that ends a file name prefix.
pub const DEFAULT_PREFIX_SEPARATOR: char = '_';

/// Text before the first `separator` in `name`, or the whole name if the
/// separator does not occur.
///
/// # Example
///
/// ```
/// use dupmerge::duplicates::prefix_of;
///
/// assert_eq!(prefix_of("report_2024_q1.txt", '_'), "report");
/// assert_eq!(prefix_of("notes.txt", '_'), "notes.txt");
/// assert_eq!(prefix_of("_hidden.txt", '_'), "");
/// ```
#[must_use]
pub fn prefix_of(name: &str, separator: char) -> &str {
    name.split_once(separator).map_or(name, |(prefix, _)| prefix)
}

/// Mapping from content hash to the first file seen with that content.
#[derive(Debug, Clone, Default)]
pub struct HashIndex {
    canonical: HashMap<ContentHash, FileEntry>,
}

impl HashIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `entry` under `hash`.
    ///
    /// Returns the canonical file if this content was already seen; the
    /// index is left unchanged in that case. Otherwise `entry` becomes the
    /// canonical file for `hash` and `None` is returned.
    pub fn observe(&mut self, hash: ContentHash, entry: &FileEntry) -> Option<&FileEntry> {
        use std::collections::hash_map::Entry;

        match self.canonical.entry(hash) {
            Entry::Occupied(existing) => Some(&*existing.into_mut()),
            Entry::Vacant(slot) => {
                slot.insert(entry.clone());
                None
            }
        }
    }

    /// Canonical file for `hash`, if any.
    #[must_use]
    pub fn get(&self, hash: &ContentHash) -> Option<&FileEntry> {
        self.canonical.get(hash)
    }

    /// Number of distinct hashes seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    /// Whether no hash has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }
}

/// A canonical file and the files found to have identical content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// First-seen file; absorbs the duplicates
    pub canonical: FileEntry,
    /// Later files with the same hash, in listing order
    pub duplicates: Vec<FileEntry>,
}

impl DuplicateGroup {
    /// Total number of files, canonical included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.duplicates.len() + 1
    }

    /// A group always contains its canonical file.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Exact-duplicate groups keyed by canonical path, in order of creation.
#[derive(Debug, Clone, Default)]
pub struct DuplicateGroups {
    groups: Vec<DuplicateGroup>,
    by_canonical: HashMap<PathBuf, usize>,
}

impl DuplicateGroups {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `duplicate` to the group of `canonical`, creating it if needed.
    pub fn add(&mut self, canonical: &FileEntry, duplicate: FileEntry) {
        let index = match self.by_canonical.get(&canonical.path) {
            Some(&index) => index,
            None => {
                self.groups.push(DuplicateGroup {
                    canonical: canonical.clone(),
                    duplicates: Vec::new(),
                });
                self.by_canonical
                    .insert(canonical.path.clone(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[index].duplicates.push(duplicate);
    }

    /// Group whose canonical file is at `path`.
    #[must_use]
    pub fn get(&self, path: &std::path::Path) -> Option<&DuplicateGroup> {
        self.by_canonical.get(path).map(|&i| &self.groups[i])
    }

    /// Iterate groups in creation order.
    pub fn iter(&self) -> std::slice::Iter<'_, DuplicateGroup> {
        self.groups.iter()
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of non-canonical files across all groups.
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.groups.iter().map(|g| g.duplicates.len()).sum()
    }
}

impl IntoIterator for DuplicateGroups {
    type Item = DuplicateGroup;
    type IntoIter = std::vec::IntoIter<DuplicateGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl<'a> IntoIterator for &'a DuplicateGroups {
    type Item = &'a DuplicateGroup;
    type IntoIter = std::slice::Iter<'a, DuplicateGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Build the hash index and duplicate groups from hashed files, in order.
///
/// The first file seen for each hash is canonical; every later file with
/// the same hash becomes one of its duplicates. Equal hashes are treated as
/// equal content with no further check.
pub fn group_by_hash<I>(hashed: I) -> (HashIndex, DuplicateGroups)
where
    I: IntoIterator<Item = (FileEntry, ContentHash)>,
{
    let mut index = HashIndex::new();
    let mut groups = DuplicateGroups::new();

    for (entry, hash) in hashed {
        if let Some(canonical) = index.observe(hash, &entry) {
            groups.add(canonical, entry);
        }
    }

    (index, groups)
}

/// Files sharing one file name prefix, in listing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixGroup {
    /// Shared prefix
    pub prefix: String,
    /// Member files; the first is the initial representative
    pub members: Vec<FileEntry>,
}

impl PrefixGroup {
    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member file names, in order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.name.as_str()).collect()
    }
}

/// Prefix groups in order of each prefix's first appearance.
#[derive(Debug, Clone, Default)]
pub struct PrefixGroups {
    groups: Vec<PrefixGroup>,
    by_prefix: HashMap<String, usize>,
}

impl PrefixGroups {
    /// Group for `prefix`, if any file had it.
    #[must_use]
    pub fn get(&self, prefix: &str) -> Option<&PrefixGroup> {
        self.by_prefix.get(prefix).map(|&i| &self.groups[i])
    }

    /// Iterate all groups, single-member ones included.
    pub fn iter(&self) -> std::slice::Iter<'_, PrefixGroup> {
        self.groups.iter()
    }

    /// Groups with more than one member.
    pub fn mergeable(&self) -> impl Iterator<Item = &PrefixGroup> {
        self.groups.iter().filter(|g| g.len() > 1)
    }

    /// Number of distinct prefixes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Group files by the text before the first `separator` in their names.
pub fn group_by_prefix<I>(files: I, separator: char) -> PrefixGroups
where
    I: IntoIterator<Item = FileEntry>,
{
    let mut result = PrefixGroups::default();

    for file in files {
        let prefix = prefix_of(&file.name, separator);
        match result.by_prefix.get(prefix) {
            Some(&index) => result.groups[index].members.push(file),
            None => {
                let prefix = prefix.to_string();
                result.by_prefix.insert(prefix.clone(), result.groups.len());
                result.groups.push(PrefixGroup {
                    prefix,
                    members: vec![file],
                });
            }
        }
    }

    result
}

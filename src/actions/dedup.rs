//! In-place line deduplication.
//!
//! # Overview
//!
//! [`LineDeduplicator`] rewrites a file so every distinct line appears once,
//! in order of first appearance. Lines are compared as raw bytes, so the
//! file does not need to be valid UTF-8.
//!
//! # Line Model
//!
//! - A line ends at `\n`. A `\r` directly before the terminator is dropped,
//!   so CRLF input comes out as LF.
//! - A final line without a terminator is kept and gets a `\n`.
//! - Every kept line is written with exactly one `\n`.
//! - An empty file stays empty.
//! - Lines longer than the configured maximum (1 MiB by default) are
//!   rejected with [`ActionError::LineTooLong`]; the file is left untouched.
//!   The limit applies to the line without its `\n` or `\r\n` terminator.
//!
//! # Atomic Replace
//!
//! Output goes to `<path>.tmp` in the same directory. The temporary file is
//! flushed and synced, then renamed over the original, so the original is
//! either fully replaced or not modified at all. On failure the temporary
//! file is removed on a best-effort basis; a leftover is harmless.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::ActionError;

/// Default maximum supported line length in bytes (1 MiB).
pub const DEFAULT_MAX_LINE_LENGTH: usize = 1024 * 1024;

/// Suffix appended to a file's path to name its rewrite target.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Path of the temporary file used while rewriting `path`.
///
/// # Example
///
/// ```
/// use dupmerge::actions::temp_path_for;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(temp_path_for(Path::new("/d/a.txt")), PathBuf::from("/d/a.txt.tmp"));
/// ```
#[must_use]
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}

/// Line counts from one deduplication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DedupStats {
    /// Lines read from the input
    pub lines_read: usize,
    /// Distinct lines written to the output
    pub lines_kept: usize,
}

impl DedupStats {
    /// Number of repeated lines that were dropped.
    #[must_use]
    pub fn lines_dropped(&self) -> usize {
        self.lines_read - self.lines_kept
    }
}

/// Failure while streaming lines from a reader to a writer.
#[derive(Debug, Error)]
pub enum LineStreamError {
    /// Reading the input failed.
    #[error("read failed: {0}")]
    Read(#[source] io::Error),

    /// Writing the output failed.
    #[error("write failed: {0}")]
    Write(#[source] io::Error),

    /// A line exceeded the maximum line length.
    #[error("line {line} is longer than {limit} bytes")]
    LineTooLong { line: usize, limit: usize },
}

/// Rewrites files keeping only the first occurrence of each line.
#[derive(Debug, Clone)]
pub struct LineDeduplicator {
    max_line_length: usize,
}

impl Default for LineDeduplicator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINE_LENGTH)
    }
}

impl LineDeduplicator {
    /// Create a deduplicator that accepts lines up to `max_line_length` bytes
    /// (terminator excluded). A limit of 0 is raised to 1.
    #[must_use]
    pub fn new(max_line_length: usize) -> Self {
        Self {
            max_line_length: max_line_length.max(1),
        }
    }

    /// The longest accepted line, in bytes.
    #[must_use]
    pub fn max_line_length(&self) -> usize {
        self.max_line_length
    }

    /// Copy the distinct lines of `reader` to `writer`, in first-seen order.
    ///
    /// # Errors
    ///
    /// Returns a [`LineStreamError`] naming which side failed.
    pub fn dedup_stream<R: BufRead, W: Write>(
        &self,
        mut reader: R,
        writer: &mut W,
    ) -> Result<DedupStats, LineStreamError> {
        let limit = self.max_line_length;
        // Room for the longest accepted line plus a CRLF terminator.
        let read_bound = u64::try_from(limit)
            .unwrap_or(u64::MAX)
            .saturating_add(2);
        let mut seen: HashSet<Vec<u8>> = HashSet::new();
        let mut stats = DedupStats::default();
        let mut line = Vec::new();

        loop {
            line.clear();
            let read = (&mut reader)
                .take(read_bound)
                .read_until(b'\n', &mut line)
                .map_err(LineStreamError::Read)?;
            if read == 0 {
                break;
            }
            stats.lines_read += 1;

            if line.last() == Some(&b'\n') {
                line.pop();
            }
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            if line.len() > limit {
                return Err(LineStreamError::LineTooLong {
                    line: stats.lines_read,
                    limit,
                });
            }

            if seen.contains(line.as_slice()) {
                continue;
            }
            writer
                .write_all(&line)
                .and_then(|()| writer.write_all(b"\n"))
                .map_err(LineStreamError::Write)?;
            seen.insert(line.clone());
            stats.lines_kept += 1;
        }

        Ok(stats)
    }

    /// Deduplicate an in-memory buffer.
    ///
    /// # Errors
    ///
    /// Only [`LineStreamError::LineTooLong`] can occur.
    pub fn dedup_bytes(&self, input: &[u8]) -> Result<(Vec<u8>, DedupStats), LineStreamError> {
        let mut output = Vec::with_capacity(input.len());
        let stats = self.dedup_stream(input, &mut output)?;
        Ok((output, stats))
    }

    /// Rewrite `path` in place so each line appears once.
    ///
    /// # Errors
    ///
    /// - `NotFound` / `PermissionDenied` / `Io` if the file can't be read or
    ///   the temporary file can't be created, written or synced
    /// - `LineTooLong` if a line exceeds the maximum line length
    /// - `Replace` if renaming the temporary file over the original fails
    ///
    /// In every error case the original file is unchanged.
    pub fn dedup_file(&self, path: &Path) -> Result<DedupStats, ActionError> {
        let temp = temp_path_for(path);

        let result = self
            .write_temp(path, &temp)
            .and_then(|stats| match fs::rename(&temp, path) {
                Ok(()) => Ok(stats),
                Err(source) => Err(ActionError::Replace {
                    path: path.to_path_buf(),
                    temp: temp.clone(),
                    source,
                }),
            });

        if result.is_err() {
            discard_temp(&temp);
        }
        result
    }

    /// Write the deduplicated content of `path` to `temp`, synced to disk.
    /// Both handles are closed when this returns.
    fn write_temp(&self, path: &Path, temp: &Path) -> Result<DedupStats, ActionError> {
        let source = File::open(path).map_err(|e| ActionError::from_io(path, e))?;
        let permissions = source
            .metadata()
            .map_err(|e| ActionError::from_io(path, e))?
            .permissions();

        let temp_file = File::create(temp).map_err(|e| ActionError::from_io(temp, e))?;
        let mut writer = BufWriter::new(temp_file);

        let stats = self
            .dedup_stream(BufReader::new(source), &mut writer)
            .map_err(|e| match e {
                LineStreamError::Read(io) => ActionError::from_io(path, io),
                LineStreamError::Write(io) => ActionError::from_io(temp, io),
                LineStreamError::LineTooLong { line, limit } => ActionError::LineTooLong {
                    path: path.to_path_buf(),
                    line,
                    limit,
                },
            })?;

        let temp_file = writer
            .into_inner()
            .map_err(|e| ActionError::from_io(temp, e.into_error()))?;
        temp_file
            .sync_all()
            .map_err(|e| ActionError::from_io(temp, e))?;
        fs::set_permissions(temp, permissions).map_err(|e| ActionError::from_io(temp, e))?;

        Ok(stats)
    }
}

fn discard_temp(temp: &Path) {
    match fs::remove_file(temp) {
        Ok(()) => log::debug!("Removed temporary file {}", temp.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => log::warn!("Could not remove temporary file {}: {}", temp.display(), e),
    }
}

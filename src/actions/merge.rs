//! Byte-level file merging.
//!
//! [`append_file`] copies the full content of a source file onto the end of
//! an existing destination file. The source is only read; removing it is a
//! separate step, as is deduplicating the destination's lines.
//!
//! If the copy is interrupted, the destination may hold its original bytes
//! followed by a prefix of the source. The source is still intact in that case.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::ActionError;

/// Result of a successful merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult {
    /// File that received the bytes.
    pub destination: PathBuf,
    /// File the bytes were read from.
    pub source: PathBuf,
    /// Number of bytes appended.
    pub bytes: u64,
}

/// Append all bytes of `source` onto the end of `destination`.
///
/// The destination must already exist; it is never created. Both handles
/// are closed before this returns.
///
/// # Errors
///
/// - `NotFound` if either file is missing
/// - `PermissionDenied` if the source can't be read or the destination can't be written
/// - `Io` for read, write or flush failures
///
/// # Example
///
/// ```no_run
/// use dupmerge::actions::append_file;
/// use std::path::Path;
///
/// let merged = append_file(Path::new("a.txt"), Path::new("b.txt")).unwrap();
/// println!("appended {} bytes", merged.bytes);
/// ```
pub fn append_file(destination: &Path, source: &Path) -> Result<MergeResult, ActionError> {
    let dest_file = OpenOptions::new()
        .append(true)
        .open(destination)
        .map_err(|e| ActionError::from_io(destination, e))?;
    let src_file = File::open(source).map_err(|e| ActionError::from_io(source, e))?;

    let mut reader = BufReader::new(src_file);
    let mut writer = BufWriter::new(dest_file);

    let bytes = copy_attributed(&mut reader, &mut writer, source, destination)?;
    writer
        .flush()
        .map_err(|e| ActionError::from_io(destination, e))?;

    Ok(MergeResult {
        destination: destination.to_path_buf(),
        source: source.to_path_buf(),
        bytes,
    })
}

/// `io::copy`, but with read errors blamed on the source and write errors
/// blamed on the destination.
fn copy_attributed(
    reader: &mut impl io::BufRead,
    writer: &mut impl Write,
    source: &Path,
    destination: &Path,
) -> Result<u64, ActionError> {
    let mut total = 0u64;
    loop {
        let chunk = match reader.fill_buf() {
            Ok([]) => return Ok(total),
            Ok(chunk) => chunk,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ActionError::from_io(source, e)),
        };
        let len = chunk.len();
        writer
            .write_all(chunk)
            .map_err(|e| ActionError::from_io(destination, e))?;
        reader.consume(len);
        total += len as u64;
    }
}

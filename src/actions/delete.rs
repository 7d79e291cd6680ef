//! File removal, permanent or via the trash crate.
//!
//! # Overview
//!
//! Merge passes remove a file once its content lives on in another file.
//! By default removal is permanent (`std::fs::remove_file`); with
//! [`DeleteMode::Trash`] the file is moved to the system trash instead and
//! can be recovered.
//!
//! # Example
//!
//! ```no_run
//! use dupmerge::actions::delete::{remove_file, DeleteMode};
//! use std::path::Path;
//!
//! match remove_file(Path::new("/path/to/duplicate.txt"), DeleteMode::Permanent) {
//!     Ok(result) => println!("Removed: {}", result.path.display()),
//!     Err(e) => eprintln!("Failed: {}", e),
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ActionError;

/// How a removed file is disposed of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteMode {
    /// Unlink the file. Cannot be undone.
    #[default]
    Permanent,
    /// Move the file to the system trash.
    Trash,
}

impl DeleteMode {
    /// Pick the mode from a "use trash" flag.
    #[must_use]
    pub fn from_use_trash(use_trash: bool) -> Self {
        if use_trash {
            Self::Trash
        } else {
            Self::Permanent
        }
    }
}

/// Result of a successful removal.
#[derive(Debug, Clone)]
pub struct DeleteResult {
    /// Path that was removed.
    pub path: PathBuf,
    /// Size of the removed file in bytes.
    pub size: u64,
    /// Whether the file was moved to trash rather than unlinked.
    pub trashed: bool,
}

/// Remove a single file.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `PermissionDenied` if removal is not allowed
/// - `TrashFailed` if the trash operation fails
/// - `Io` for any other failure
pub fn remove_file(path: &Path, mode: DeleteMode) -> Result<DeleteResult, ActionError> {
    let size = fs::symlink_metadata(path)
        .map_err(|e| ActionError::from_io(path, e))?
        .len();

    match mode {
        DeleteMode::Permanent => {
            fs::remove_file(path).map_err(|e| ActionError::from_io(path, e))?;
            log::trace!("Unlinked {} ({} bytes)", path.display(), size);
        }
        DeleteMode::Trash => {
            trash::delete(path).map_err(|e| ActionError::TrashFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            log::trace!("Moved to trash: {} ({} bytes)", path.display(), size);
        }
    }

    Ok(DeleteResult {
        path: path.to_path_buf(),
        size,
        trashed: mode == DeleteMode::Trash,
    })
}

//! Symlink primitive port.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LinkError;

/// Outcome of removing a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Removal {
    /// The entry existed and is gone now.
    Removed,
    /// There was nothing to remove.
    Absent,
}

/// Creates, reads and removes symbolic links.
///
/// Each call is assumed to be atomic at the OS level and to return promptly.
pub trait LinkFs: Send + Sync {
    /// Creates (or replaces) the link `dir/name` with content `target`.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Interrupted`] if the call was interrupted and
    /// [`LinkError::Io`] or [`LinkError::Unsupported`] for OS restrictions.
    fn create_symlink(&self, dir: &Path, target: &Path, name: &str) -> Result<(), LinkError>;

    /// Reads the content of a symbolic link.
    ///
    /// Returns `Ok(None)` if nothing exists at `path` or the entry is not a
    /// symbolic link.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry exists but cannot be inspected.
    fn read_link(&self, path: &Path) -> Result<Option<String>, LinkError>;

    /// Removes whatever entry is at `path` without following links.
    ///
    /// Directories are only removed when empty.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry exists and cannot be removed.
    fn remove(&self, path: &Path) -> Result<Removal, LinkError>;

    /// Returns `true` if `path` is a directory (following symlinks).
    fn is_dir(&self, path: &Path) -> bool;
}

//! On-disk access for listed files: size lookup and cabinet renames.

use crate::error::{MsiError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Filesystem operations the table builder needs for listed items.
pub trait FileStore {
    /// Byte size of the file at `path`.
    fn file_size(&self, path: &Path) -> Result<u64>;

    /// Move `from` to `to`.
    fn relocate(&self, from: &Path, to: &Path) -> Result<()>;
}

/// [`FileStore`] backed by the real filesystem.
#[derive(Debug, Clone, Default)]
pub struct DiskFileStore;

impl FileStore for DiskFileStore {
    fn file_size(&self, path: &Path) -> Result<u64> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            MsiError::Resource(format!("Could not open file: {}: {}", path.display(), e))
        })?;
        if !metadata.is_file() {
            return Err(MsiError::Resource(format!(
                "Not a regular file: {}",
                path.display()
            )));
        }
        Ok(metadata.len())
    }

    fn relocate(&self, from: &Path, to: &Path) -> Result<()> {
        debug!(from = %from.display(), to = %to.display(), "Renaming file");
        std::fs::rename(from, to).map_err(|e| {
            MsiError::Resource(format!(
                "Failed to rename {} to {}: {}",
                from.display(),
                to.display(),
                e
            ))
        })
    }
}

/// A rename requested while reading listings, applied after the tables are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRename {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Apply every planned rename in order, stopping at the first failure.
pub fn apply_renames<F: FileStore + ?Sized>(store: &F, renames: &[PlannedRename]) -> Result<()> {
    for rename in renames {
        store.relocate(&rename.from, &rename.to)?;
    }
    Ok(())
}

//! Test doubles for the external collaborators.

use crate::error::{MsiError, Result};
use crate::files::FileStore;
use crate::uuids::UuidSource;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Deterministic tokens `{00000000-0000-0000-0000-00000000000N}`, optionally limited.
#[derive(Debug, Default)]
pub struct SequentialUuids {
    next: usize,
    limit: Option<usize>,
}

impl SequentialUuids {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limited(limit: usize) -> Self {
        Self {
            next: 0,
            limit: Some(limit),
        }
    }
}

impl UuidSource for SequentialUuids {
    fn next_uuid(&mut self) -> Result<String> {
        if self.limit.map_or(false, |limit| self.next >= limit) {
            return Err(MsiError::Resource("Ran out of UUIDs".to_string()));
        }
        let token = format!("{{00000000-0000-0000-0000-{:012}}}", self.next);
        self.next += 1;
        Ok(token)
    }
}

/// In-memory file sizes. In permissive mode every path exists and its size is
/// the length of its file name.
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    sizes: HashMap<PathBuf, u64>,
    permissive: bool,
    pub relocated: RefCell<Vec<(PathBuf, PathBuf)>>,
}

impl MemoryFileStore {
    pub fn permissive() -> Self {
        Self {
            permissive: true,
            ..Self::default()
        }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, size: u64) -> Self {
        self.sizes.insert(path.into(), size);
        self
    }
}

impl FileStore for MemoryFileStore {
    fn file_size(&self, path: &Path) -> Result<u64> {
        if let Some(size) = self.sizes.get(path) {
            return Ok(*size);
        }
        if self.permissive {
            let name_len = path.file_name().map(|n| n.len()).unwrap_or(0);
            return Ok(name_len as u64);
        }
        Err(MsiError::Resource(format!(
            "Could not open file: {}",
            path.display()
        )))
    }

    fn relocate(&self, from: &Path, to: &Path) -> Result<()> {
        self.relocated
            .borrow_mut()
            .push((from.to_path_buf(), to.to_path_buf()));
        Ok(())
    }
}

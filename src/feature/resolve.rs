//! Path resolution against the directory forest.

use crate::error::{MsiError, Result};
use crate::tables::InstallerTables;
use crate::tree::DirectoryForest;
use crate::types::{FileIdx, NodeIdx};

/// What a feature item path names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Directory(NodeIdx),
    File { directory: NodeIdx, file: FileIdx },
}

/// Resolve `path` (`root/dir/.../name`) to a directory or a listed file.
///
/// The first segment selects a root by name. Remaining segments are matched as child
/// directories for as long as possible; a child directory always wins over a file of
/// the same name. Whatever is left must be a single file name recorded under the last
/// matched directory.
pub fn resolve_path(
    forest: &DirectoryForest,
    tables: &InstallerTables,
    source_name: &str,
    path: &str,
) -> Result<Target> {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    let Some((root_name, rest)) = segments.split_first() else {
        return Err(MsiError::Resolution(format!(
            "{}: empty path in feature item {:?}",
            source_name, path
        )));
    };

    let mut node = forest.find_root(root_name).ok_or_else(|| {
        MsiError::Resolution(format!(
            "{}: invalid root {:?} in path {:?}",
            source_name, root_name, path
        ))
    })?;

    let mut matched = 0;
    for segment in rest {
        match forest.find_child(node, segment) {
            Some(child) => {
                node = child;
                matched += 1;
            }
            None => break,
        }
    }

    match &rest[matched..] {
        [] => Ok(Target::Directory(node)),
        [name] => forest
            .node(node)
            .files
            .iter()
            .copied()
            .find(|file| tables.file(*file).name == *name)
            .map(|file| Target::File {
                directory: node,
                file,
            })
            .ok_or_else(|| {
                MsiError::Resolution(format!(
                    "{}: invalid file name {:?} in path {:?}",
                    source_name, name, path
                ))
            }),
        [directory, ..] => Err(MsiError::Resolution(format!(
            "{}: invalid directory {:?} in path {:?}",
            source_name, directory, path
        ))),
    }
}

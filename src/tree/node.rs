//! Directory node representation

use crate::types::{ComponentIdx, DirectoryIdx, FileIdx, NodeIdx};

/// One directory of a listing, as seen by every root that reaches it.
#[derive(Debug, Clone)]
pub struct DirectoryNode {
    /// Path segment (for a root: the listing's top-level name)
    pub name: String,
    /// Root the node was first created under
    pub root: NodeIdx,
    /// Segments after the root name, joined by `/`; empty for a root
    pub rel_path: String,
    pub row: DirectoryIdx,
    /// Shared component of the directory, created with its first file
    pub component: Option<ComponentIdx>,
    /// Once set, files claimed by a new feature get their own component
    pub per_file_components: bool,
    pub children: Vec<NodeIdx>,
    pub files: Vec<FileIdx>,
}

impl DirectoryNode {
    pub(crate) fn new(name: &str, root: NodeIdx, rel_path: String, row: DirectoryIdx) -> Self {
        Self {
            name: name.to_string(),
            root,
            rel_path,
            row,
            component: None,
            per_file_components: false,
            children: Vec::new(),
            files: Vec::new(),
        }
    }
}

//! Listing consumer: turns parser events into directory, component, and file rows.
//!
//! A label names a directory by path (`a/b/c`), or relative to its enclosing label
//! when nested by indentation. The builder keeps a stack of open path segments,
//! closes whatever diverges from the new path and opens the rest, reusing any
//! directory an earlier listing already created under the same root-relative path.

use crate::error::{MsiError, Result};
use crate::files::{FileStore, PlannedRename};
use crate::parser::{LevelChange, SectionHandler};
use crate::tables::InstallerTables;
use crate::tree::DirectoryForest;
use crate::types::{DirectoryRef, NodeIdx};
use crate::uuids::UuidSource;
use std::path::PathBuf;
use tracing::debug;

/// Per-run options for reading listings.
#[derive(Debug, Clone, Default)]
pub struct ListingOptions {
    /// Directory the listed paths are relative to
    pub source_root: PathBuf,
    /// Plan a rename of every listed file to its file identifier
    pub rename_files: bool,
}

#[derive(Debug, Clone)]
struct StackEntry {
    segment: String,
    node: NodeIdx,
}

/// Handler state for one listing.
pub struct ListingBuilder<'a> {
    source_name: String,
    first_listing: bool,
    tables: &'a mut InstallerTables,
    forest: &'a mut DirectoryForest,
    uuids: &'a mut dyn UuidSource,
    files: &'a dyn FileStore,
    options: &'a ListingOptions,
    stack: Vec<StackEntry>,
    /// Stack depth reached by the label open at each indentation level
    section_depths: Vec<usize>,
    root: Option<NodeIdx>,
    renames: Vec<PlannedRename>,
}

impl<'a> ListingBuilder<'a> {
    /// The first listing read into an empty forest becomes the primary root.
    pub fn new(
        source_name: &str,
        tables: &'a mut InstallerTables,
        forest: &'a mut DirectoryForest,
        uuids: &'a mut dyn UuidSource,
        files: &'a dyn FileStore,
        options: &'a ListingOptions,
    ) -> Self {
        let first_listing = forest.roots().is_empty();
        Self {
            source_name: source_name.to_string(),
            first_listing,
            tables,
            forest,
            uuids,
            files,
            options,
            stack: Vec::new(),
            section_depths: Vec::new(),
            root: None,
            renames: Vec::new(),
        }
    }

    pub fn root(&self) -> Option<NodeIdx> {
        self.root
    }

    pub fn into_renames(self) -> Vec<PlannedRename> {
        self.renames
    }

    fn current(&self) -> Option<NodeIdx> {
        self.stack.last().map(|entry| entry.node)
    }

    /// Find or create the directory for `path[..=depth]`; `stack` holds `path[..depth]`.
    fn open_directory(&mut self, path: &[String], depth: usize) -> Result<NodeIdx> {
        let name = path[depth].as_str();

        if depth == 0 {
            if let Some(root) = self.root {
                return Ok(root);
            }
            let node = if self.first_listing {
                let row = self.tables.add_directory(DirectoryRef::ProgramDir, name);
                self.forest.add_root(name, row)
            } else {
                // Named roots install into the primary root's directory.
                let primary = self.forest.primary_root().ok_or_else(|| {
                    MsiError::Format(format!(
                        "{}: no primary listing to attach root {:?} to",
                        self.source_name, name
                    ))
                })?;
                let row = self.forest.node(primary).row;
                self.forest.add_root(name, row)
            };
            debug!(source = %self.source_name, root = name, "Opened root");
            self.root = Some(node);
            return Ok(node);
        }

        let parent = self.stack[depth - 1].node;
        let rel_path = path[1..=depth].join("/");
        if let Some(existing) = self.forest.lookup(&rel_path) {
            self.forest.attach(parent, existing);
            debug!(source = %self.source_name, path = %rel_path, "Reusing directory");
            return Ok(existing);
        }

        let parent_row = self.forest.node(parent).row;
        let row = self.tables.add_directory(DirectoryRef::Row(parent_row), name);
        let root = self.stack[0].node;
        Ok(self.forest.add_child(parent, name, rel_path, row, root))
    }

    fn disk_path(&self, item: &str) -> PathBuf {
        let mut path = self.options.source_root.clone();
        for entry in &self.stack {
            path.push(&entry.segment);
        }
        path.push(item);
        path
    }
}

impl SectionHandler for ListingBuilder<'_> {
    fn add_section(&mut self, level: usize, label: &str) -> Result<()> {
        let segments: Vec<&str> = label
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .collect();
        if segments.is_empty() {
            return Err(MsiError::Format(format!(
                "{}: empty directory label {:?}",
                self.source_name, label
            )));
        }

        // A nested label continues the path opened by its enclosing label.
        self.section_depths.truncate(level.saturating_sub(1));
        let base = if level > 1 {
            self.section_depths.last().copied().unwrap_or(0)
        } else {
            0
        };
        let mut path: Vec<String> = self.stack[..base.min(self.stack.len())]
            .iter()
            .map(|entry| entry.segment.clone())
            .collect();
        path.extend(segments.iter().map(|segment| segment.to_string()));

        let common = self
            .stack
            .iter()
            .zip(&path)
            .take_while(|(entry, segment)| entry.segment == **segment)
            .count();
        if common == 0 {
            if let Some(root) = self.root {
                return Err(MsiError::Format(format!(
                    "{}: listing has more than one top-level directory: {:?} and {:?}",
                    self.source_name,
                    self.forest.node(root).name,
                    path[0]
                )));
            }
        }
        self.stack.truncate(common);

        for depth in common..path.len() {
            let node = self.open_directory(&path, depth)?;
            self.stack.push(StackEntry {
                segment: path[depth].clone(),
                node,
            });
        }
        self.section_depths.push(self.stack.len());

        debug!(
            source = %self.source_name,
            level,
            path = %path.join("/"),
            "Directory section"
        );
        Ok(())
    }

    fn pop_levels(&mut self, level: usize) -> Result<LevelChange> {
        // Level 0 is an un-indented `ls -R` body, which stays in the labelled directory.
        if level >= 1 {
            if let Some(&depth) = self.section_depths.get(level - 1) {
                self.section_depths.truncate(level);
                self.stack.truncate(depth);
            }
        }
        Ok(LevelChange::Processed)
    }

    fn add_item(&mut self, item: &str) -> Result<()> {
        let node_idx = self.current().ok_or_else(|| {
            MsiError::Format(format!(
                "{}: item {:?} appears before any directory label",
                self.source_name, item
            ))
        })?;

        let component = match self.forest.node(node_idx).component {
            Some(component) => component,
            None => {
                let uuid = self.uuids.next_uuid()?;
                let row = self.forest.node(node_idx).row;
                let component = self.tables.add_component(uuid, row);
                self.forest.node_mut(node_idx).component = Some(component);
                component
            }
        };

        let disk_path = self.disk_path(item);
        let size = self.files.file_size(&disk_path)?;
        let file = self.tables.add_file(component, item, size);
        self.forest.node_mut(node_idx).files.push(file);

        let component_row = self.tables.component_mut(component);
        if component_row.key_file.is_none() {
            component_row.key_file = Some(file);
        }

        if self.options.rename_files {
            let primary = self.forest.primary_root().unwrap_or(node_idx);
            let target = self
                .options
                .source_root
                .join(&self.forest.node(primary).name)
                .join(&self.tables.file(file).id);
            self.renames.push(PlannedRename {
                from: disk_path,
                to: target,
            });
        }

        debug!(
            source = %self.source_name,
            file = item,
            sequence = self.tables.file(file).sequence,
            size,
            "Listed file"
        );
        Ok(())
    }
}

//! Feature/component assignment.
//!
//! Each label of the feature file becomes a feature row, nested under the label
//! that encloses it. Each item names a directory (granting every component below
//! it) or a single listed file. A directory's files start out in one shared
//! component; once a file item has claimed from it, files claimed later by another
//! item are split into components of their own. Directory items only add links.

use crate::error::{MsiError, Result};
use crate::feature::resolve::{resolve_path, Target};
use crate::parser::{LevelChange, SectionHandler};
use crate::tables::InstallerTables;
use crate::tree::DirectoryForest;
use crate::types::{ComponentIdx, FeatureIdx, FileIdx, NodeIdx};
use crate::uuids::UuidSource;
use std::collections::HashSet;
use tracing::debug;

/// File claim that a directly following item of the same feature and directory joins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LastAssignment {
    feature: FeatureIdx,
    directory: NodeIdx,
    component: ComponentIdx,
}

/// Handler state for the feature file.
pub struct FeatureAssigner<'a> {
    source_name: String,
    tables: &'a mut InstallerTables,
    forest: &'a mut DirectoryForest,
    uuids: &'a mut dyn UuidSource,
    stack: Vec<FeatureIdx>,
    last: Option<LastAssignment>,
    linked: HashSet<(FeatureIdx, ComponentIdx)>,
    /// Files named by a file item while still in their directory's shared component
    pinned: HashSet<FileIdx>,
}

impl<'a> FeatureAssigner<'a> {
    pub fn new(
        source_name: &str,
        tables: &'a mut InstallerTables,
        forest: &'a mut DirectoryForest,
        uuids: &'a mut dyn UuidSource,
    ) -> Self {
        let linked = tables
            .feature_components
            .iter()
            .map(|row| (row.feature, row.component))
            .collect();
        Self {
            source_name: source_name.to_string(),
            tables,
            forest,
            uuids,
            stack: Vec::new(),
            last: None,
            linked,
            pinned: HashSet::new(),
        }
    }

    fn current_feature(&self, item: &str) -> Result<FeatureIdx> {
        self.stack.last().copied().ok_or_else(|| {
            MsiError::Format(format!(
                "{}: item {:?} is not inside any feature",
                self.source_name, item
            ))
        })
    }

    fn link(&mut self, feature: FeatureIdx, component: ComponentIdx) {
        if self.linked.insert((feature, component)) {
            self.tables.link(feature, component);
        }
    }

    /// Move `file` into `to`, handing the key path of its old component to a file
    /// that component still owns.
    fn move_file(&mut self, file: FileIdx, to: ComponentIdx) {
        let from = self.tables.file(file).component;
        if from == to {
            return;
        }
        self.tables.file_mut(file).component = to;
        if self.tables.component(from).key_file == Some(file) {
            let successor = self.tables.files_of(from).first().copied();
            debug!(
                source = %self.source_name,
                component = %self.tables.component(from).id,
                "Re-keyed component"
            );
            self.tables.component_mut(from).key_file = successor;
        }
    }

    fn grant_directory(&mut self, feature: FeatureIdx, start: NodeIdx) {
        for node_idx in self.forest.preorder(start) {
            let node = self.forest.node(node_idx);
            let mut components: Vec<ComponentIdx> = node.component.into_iter().collect();
            for file in &node.files {
                let component = self.tables.file(*file).component;
                if !components.contains(&component) {
                    components.push(component);
                }
            }
            for component in components {
                self.link(feature, component);
            }
        }
        self.last = None;
    }

    fn grant_file(&mut self, feature: FeatureIdx, directory: NodeIdx, file: FileIdx) -> Result<()> {
        let (shared, per_file, row) = {
            let node = self.forest.node(directory);
            (node.component, node.per_file_components, node.row)
        };
        let current = self.tables.file(file).component;

        // Split-off files and files already named by an item stay put.
        if shared != Some(current) || self.pinned.contains(&file) {
            self.link(feature, current);
            self.last = None;
            return Ok(());
        }

        let repeat = self
            .last
            .filter(|last| last.feature == feature && last.directory == directory);
        let component = if let Some(last) = repeat {
            self.move_file(file, last.component);
            last.component
        } else if per_file {
            let uuid = self.uuids.next_uuid()?;
            let split = self.tables.add_component(uuid, row);
            self.tables.component_mut(split).key_file = Some(file);
            self.move_file(file, split);
            debug!(
                source = %self.source_name,
                file = %self.tables.file(file).name,
                component = %self.tables.component(split).id,
                "Split file into its own component"
            );
            split
        } else {
            self.forest.node_mut(directory).per_file_components = true;
            current
        };

        if Some(component) == shared {
            self.pinned.insert(file);
        }
        self.link(feature, component);
        self.last = Some(LastAssignment {
            feature,
            directory,
            component,
        });
        Ok(())
    }
}

impl SectionHandler for FeatureAssigner<'_> {
    fn add_section(&mut self, level: usize, label: &str) -> Result<()> {
        self.stack.truncate(level.saturating_sub(1));
        let parent = self.stack.last().copied();
        let feature = self.tables.add_feature(parent, label);
        self.stack.push(feature);
        self.last = None;
        debug!(
            source = %self.source_name,
            level,
            feature = %self.tables.feature(feature).id,
            title = label,
            "Feature"
        );
        Ok(())
    }

    fn pop_levels(&mut self, level: usize) -> Result<LevelChange> {
        self.stack.truncate(level);
        Ok(LevelChange::Processed)
    }

    fn add_item(&mut self, item: &str) -> Result<()> {
        let feature = self.current_feature(item)?;
        match resolve_path(&*self.forest, &*self.tables, &self.source_name, item)? {
            Target::Directory(node) => self.grant_directory(feature, node),
            Target::File { directory, file } => self.grant_file(feature, directory, file)?,
        }
        Ok(())
    }
}

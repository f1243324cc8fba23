//! Installer table rows.
//!
//! All tables are append-only; row order is insertion order and is preserved when
//! the tables are emitted. [`InstallerTables`] is the only place identifiers and
//! row strings are created. Everything else holds index handles into it.

use crate::types::{ComponentIdx, DirectoryIdx, DirectoryRef, FeatureIdx, FileIdx};

/// Component attribute written for every generated component
pub const COMPONENT_ATTRIBUTES: u16 = 2;

/// File attribute written for every generated file
pub const FILE_ATTRIBUTES: u16 = 0;

/// Install level written for every feature
pub const FEATURE_INSTALL_LEVEL: u16 = 3;

/// Top-level features are installed locally by default
pub const FEATURE_ATTRIBUTES_ROOT: u16 = 0;

/// Nested features follow their parent's install state
pub const FEATURE_ATTRIBUTES_NESTED: u16 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRow {
    pub id: String,
    pub parent: DirectoryRef,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRow {
    pub id: String,
    pub uuid: String,
    pub directory: DirectoryIdx,
    pub attributes: u16,
    pub condition: String,
    /// Unset only between creation and the first file placed in the component
    pub key_file: Option<FileIdx>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRow {
    pub id: String,
    /// Reassigned when a directory's shared component is split
    pub component: ComponentIdx,
    pub name: String,
    pub size: u64,
    pub version: String,
    pub language: String,
    pub attributes: u16,
    /// 1-based media sequence, equal to the row position
    pub sequence: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRow {
    pub id: String,
    pub parent: Option<FeatureIdx>,
    pub title: String,
    pub description: String,
    pub display: usize,
    pub level: u16,
    pub directory: DirectoryRef,
    pub attributes: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureComponentRow {
    pub feature: FeatureIdx,
    pub component: ComponentIdx,
}

/// The five accumulated tables of one run.
#[derive(Debug, Clone, Default)]
pub struct InstallerTables {
    id_prefix: String,
    pub directories: Vec<DirectoryRow>,
    pub components: Vec<ComponentRow>,
    pub files: Vec<FileRow>,
    pub features: Vec<FeatureRow>,
    pub feature_components: Vec<FeatureComponentRow>,
}

impl InstallerTables {
    pub fn new(id_prefix: impl Into<String>) -> Self {
        Self {
            id_prefix: id_prefix.into(),
            ..Self::default()
        }
    }

    pub fn id_prefix(&self) -> &str {
        &self.id_prefix
    }

    pub fn add_directory(&mut self, parent: DirectoryRef, name: &str) -> DirectoryIdx {
        let idx = DirectoryIdx(self.directories.len());
        self.directories.push(DirectoryRow {
            id: format!("{}d{}", self.id_prefix, idx.0),
            parent,
            name: name.to_string(),
        });
        idx
    }

    /// Append a component anchored to `directory`. The key file is set by the caller
    /// once the first file of the component exists.
    pub fn add_component(&mut self, uuid: String, directory: DirectoryIdx) -> ComponentIdx {
        let idx = ComponentIdx(self.components.len());
        self.components.push(ComponentRow {
            id: format!("{}c{}", self.id_prefix, idx.0),
            uuid,
            directory,
            attributes: COMPONENT_ATTRIBUTES,
            condition: String::new(),
            key_file: None,
        });
        idx
    }

    pub fn add_file(&mut self, component: ComponentIdx, name: &str, size: u64) -> FileIdx {
        let idx = FileIdx(self.files.len());
        self.files.push(FileRow {
            id: format!("{}f{}", self.id_prefix, idx.0),
            component,
            name: name.to_string(),
            size,
            version: String::new(),
            language: String::new(),
            attributes: FILE_ATTRIBUTES,
            sequence: idx.0 + 1,
        });
        idx
    }

    /// Append a feature. Title and description are both the label; the attributes
    /// depend on whether the feature has a parent.
    pub fn add_feature(&mut self, parent: Option<FeatureIdx>, label: &str) -> FeatureIdx {
        let idx = FeatureIdx(self.features.len());
        let attributes = match parent {
            Some(_) => FEATURE_ATTRIBUTES_NESTED,
            None => FEATURE_ATTRIBUTES_ROOT,
        };
        self.features.push(FeatureRow {
            id: format!("{}ft{}", self.id_prefix, idx.0),
            parent,
            title: label.to_string(),
            description: label.to_string(),
            display: (idx.0 + 1) * 2,
            level: FEATURE_INSTALL_LEVEL,
            directory: DirectoryRef::ProgramDir,
            attributes,
        });
        idx
    }

    pub fn link(&mut self, feature: FeatureIdx, component: ComponentIdx) {
        self.feature_components
            .push(FeatureComponentRow { feature, component });
    }

    pub fn directory(&self, idx: DirectoryIdx) -> &DirectoryRow {
        &self.directories[idx.0]
    }

    pub fn component(&self, idx: ComponentIdx) -> &ComponentRow {
        &self.components[idx.0]
    }

    pub fn component_mut(&mut self, idx: ComponentIdx) -> &mut ComponentRow {
        &mut self.components[idx.0]
    }

    pub fn file(&self, idx: FileIdx) -> &FileRow {
        &self.files[idx.0]
    }

    pub fn file_mut(&mut self, idx: FileIdx) -> &mut FileRow {
        &mut self.files[idx.0]
    }

    pub fn feature(&self, idx: FeatureIdx) -> &FeatureRow {
        &self.features[idx.0]
    }

    /// Files currently owned by `component`, in sequence order
    pub fn files_of(&self, component: ComponentIdx) -> Vec<FileIdx> {
        self.files
            .iter()
            .enumerate()
            .filter(|(_, row)| row.component == component)
            .map(|(i, _)| FileIdx(i))
            .collect()
    }
}

//! Build orchestration: listings first, then the feature file.

use crate::error::{MsiError, Result};
use crate::feature::FeatureAssigner;
use crate::files::{FileStore, PlannedRename};
use crate::parser::ColonParser;
use crate::tables::InstallerTables;
use crate::tree::{DirectoryForest, ListingBuilder, ListingOptions};
use crate::types::NodeIdx;
use crate::uuids::UuidSource;
use std::io::Read;
use std::str::FromStr;
use tracing::info;

/// Program directory under `ProgramFilesFolder`, given as `SHORT|Long Name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramDirectory {
    /// Directory table id: upper-cased short name followed by `DIR`
    pub id: String,
    pub short_name: String,
    pub long_name: String,
}

impl ProgramDirectory {
    pub fn parse(value: &str) -> Result<Self> {
        let (short_name, long_name) = value.split_once('|').ok_or_else(|| {
            MsiError::Argument(format!(
                "program directory must be given as SHORT|LONG, got {:?}",
                value
            ))
        })?;
        if short_name.is_empty() {
            return Err(MsiError::Argument(format!(
                "program directory short name is empty in {:?}",
                value
            )));
        }
        Ok(Self {
            id: format!("{}DIR", short_name.to_uppercase()),
            short_name: short_name.to_string(),
            long_name: long_name.to_string(),
        })
    }

    /// `DefaultDir` column value
    pub fn default_dir(&self) -> String {
        format!("{}|{}", self.short_name, self.long_name)
    }
}

impl FromStr for ProgramDirectory {
    type Err = MsiError;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

/// Settings fixed for the whole run.
#[derive(Debug, Clone)]
pub struct PackageSettings {
    pub id_prefix: String,
    pub program_dir: ProgramDirectory,
    pub listing: ListingOptions,
}

/// Accumulates tables across the listing pass and finishes with the feature pass.
pub struct PackageBuilder {
    settings: PackageSettings,
    tables: InstallerTables,
    forest: DirectoryForest,
    uuids: Box<dyn UuidSource>,
    files: Box<dyn FileStore>,
    renames: Vec<PlannedRename>,
}

impl PackageBuilder {
    pub fn new(
        settings: PackageSettings,
        uuids: Box<dyn UuidSource>,
        files: Box<dyn FileStore>,
    ) -> Self {
        let tables = InstallerTables::new(settings.id_prefix.clone());
        Self {
            settings,
            tables,
            forest: DirectoryForest::new(),
            uuids,
            files,
            renames: Vec::new(),
        }
    }

    /// Read one listing. The first listing becomes the primary root; each later one
    /// adds a named root. Returns the listing's root node.
    pub fn add_listing<R: Read>(&mut self, source_name: &str, reader: R) -> Result<NodeIdx> {
        let mut builder = ListingBuilder::new(
            source_name,
            &mut self.tables,
            &mut self.forest,
            self.uuids.as_mut(),
            self.files.as_ref(),
            &self.settings.listing,
        );
        ColonParser::new(source_name).parse(reader, &mut builder)?;
        let root = builder.root().ok_or_else(|| {
            MsiError::Format(format!("{}: listing names no directory", source_name))
        })?;
        self.renames.extend(builder.into_renames());

        info!(
            source = source_name,
            directories = self.tables.directories.len(),
            components = self.tables.components.len(),
            files = self.tables.files.len(),
            "Listing read"
        );
        Ok(root)
    }

    /// Read the feature file and finish the build.
    pub fn assign_features<R: Read>(mut self, source_name: &str, reader: R) -> Result<BuiltPackage> {
        if self.forest.roots().is_empty() {
            return Err(MsiError::Argument(
                "at least one listing is required before features".to_string(),
            ));
        }
        let mut assigner = FeatureAssigner::new(
            source_name,
            &mut self.tables,
            &mut self.forest,
            self.uuids.as_mut(),
        );
        ColonParser::new(source_name).parse(reader, &mut assigner)?;

        info!(
            source = source_name,
            features = self.tables.features.len(),
            links = self.tables.feature_components.len(),
            components = self.tables.components.len(),
            "Features assigned"
        );
        Ok(BuiltPackage {
            program_dir: self.settings.program_dir,
            tables: self.tables,
            forest: self.forest,
            renames: self.renames,
        })
    }
}

/// Finished tables plus everything needed to write them out.
#[derive(Debug, Clone)]
pub struct BuiltPackage {
    pub program_dir: ProgramDirectory,
    pub tables: InstallerTables,
    pub forest: DirectoryForest,
    pub renames: Vec<PlannedRename>,
}

impl BuiltPackage {
    pub fn id_prefix(&self) -> &str {
        self.tables.id_prefix()
    }

    /// Name of the first listing's top directory
    pub fn primary_root_name(&self) -> Option<&str> {
        self.forest
            .primary_root()
            .map(|root| self.forest.node(root).name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryFileStore, SequentialUuids};

    fn builder(prefix: &str) -> PackageBuilder {
        PackageBuilder::new(
            PackageSettings {
                id_prefix: prefix.to_string(),
                program_dir: ProgramDirectory::parse("app|My App").unwrap(),
                listing: ListingOptions::default(),
            },
            Box::new(SequentialUuids::new()),
            Box::new(MemoryFileStore::permissive()),
        )
    }

    #[test]
    fn test_program_directory_parse() {
        let dir = ProgramDirectory::parse("myapp|My Application").unwrap();
        assert_eq!(dir.id, "MYAPPDIR");
        assert_eq!(dir.default_dir(), "myapp|My Application");

        let dir: ProgramDirectory = "x|".parse().unwrap();
        assert_eq!(dir.long_name, "");

        for bad in ["myapp", "|Long"] {
            assert!(matches!(ProgramDirectory::parse(bad), Err(MsiError::Argument(_))));
        }
    }

    #[test]
    fn test_listings_then_features() {
        let mut builder = builder("p");
        let primary = builder
            .add_listing("one.txt", "a: \n\tfoo.txt\n\tbar.txt\n".as_bytes())
            .unwrap();
        let named = builder.add_listing("two.txt", "b:\n\tz\n".as_bytes()).unwrap();
        assert_ne!(primary, named);

        let package = builder
            .assign_features(
                "features.txt",
                "App:\n\ta/foo.txt\nExtras:\n\ta/bar.txt\n\tb\n".as_bytes(),
            )
            .unwrap();

        assert_eq!(package.id_prefix(), "p");
        assert_eq!(package.primary_root_name(), Some("a"));
        assert_eq!(package.tables.features.len(), 2);
        assert_eq!(package.tables.components.len(), 3);
        assert_eq!(package.tables.feature_components.len(), 3);
        assert_eq!(package.tables.components[2].id, "pc2");
    }

    #[test]
    fn test_features_need_a_listing() {
        let err = builder("")
            .assign_features("features.txt", "App:\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, MsiError::Argument(_)));
    }

    #[test]
    fn test_empty_listing_is_rejected() {
        let mut builder = builder("");
        assert!(matches!(
            builder.add_listing("empty.txt", "".as_bytes()),
            Err(MsiError::Format(_))
        ));
    }
}

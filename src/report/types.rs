//! Summary types shared by the text and JSON output.

use crate::package::BuiltPackage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Table name and row count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableCount {
    pub table: String,
    pub rows: usize,
}

/// One listing root with the number of directories reachable from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RootSummary {
    pub name: String,
    pub primary: bool,
    pub directories: usize,
}

/// Everything a finished run reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSummary {
    pub id_prefix: String,
    pub program_dir: String,
    pub roots: Vec<RootSummary>,
    pub tables: Vec<TableCount>,
    pub renamed_files: usize,
    pub written: Vec<PathBuf>,
}

impl PackageSummary {
    pub fn from_package(package: &BuiltPackage, written: Vec<PathBuf>) -> Self {
        let tables = &package.tables;
        let roots = package
            .forest
            .roots()
            .iter()
            .enumerate()
            .map(|(i, root)| RootSummary {
                name: package.forest.node(*root).name.clone(),
                primary: i == 0,
                directories: package.forest.preorder(*root).len(),
            })
            .collect();
        let count = |table: &str, rows: usize| TableCount {
            table: table.to_string(),
            rows,
        };
        Self {
            id_prefix: package.id_prefix().to_string(),
            program_dir: package.program_dir.id.clone(),
            roots,
            tables: vec![
                count("Directory", tables.directories.len()),
                count("Component", tables.components.len()),
                count("File", tables.files.len()),
                count("Feature", tables.features.len()),
                count("FeatureComponents", tables.feature_components.len()),
                count("Media", 1),
            ],
            renamed_files: package.renames.len(),
            written,
        }
    }
}

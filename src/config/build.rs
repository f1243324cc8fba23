//! BuildConfig: inputs and outputs of one table build.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_features_file() -> PathBuf {
    PathBuf::from("features.txt")
}

fn default_uuids_file() -> PathBuf {
    PathBuf::from("uuids.txt")
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Build configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuildConfig {
    /// Prepended to every generated identifier
    #[serde(default)]
    pub id_prefix: String,

    /// Program directory as `SHORT|Long Name`; required from config or CLI
    #[serde(default)]
    pub program_dir: Option<String>,

    /// Rename listed files to their file ids for cabinet packing
    #[serde(default)]
    pub rename_files: bool,

    #[serde(default = "default_features_file")]
    pub features_file: PathBuf,

    /// One UUID per line, consumed by every new component
    #[serde(default = "default_uuids_file")]
    pub uuids_file: PathBuf,

    /// Generate random UUIDs instead of reading `uuids_file`
    #[serde(default)]
    pub generate_uuids: bool,

    /// Listed paths are resolved against this directory
    #[serde(default = "default_dir")]
    pub source_root: PathBuf,

    /// Where the `.idt` files are written
    #[serde(default = "default_dir")]
    pub output_dir: PathBuf,

    /// Listing files, primary first
    #[serde(default)]
    pub listings: Vec<PathBuf>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            id_prefix: String::new(),
            program_dir: None,
            rename_files: false,
            features_file: default_features_file(),
            uuids_file: default_uuids_file(),
            generate_uuids: false,
            source_root: default_dir(),
            output_dir: default_dir(),
            listings: Vec::new(),
        }
    }
}

use msi_tables::config::MsiToolConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const UUIDS: &str = "6ba7b810-9dad-11d1-80b4-00c04fd430c8
{6ba7b811-9dad-11d1-80b4-00c04fd430c8}

6BA7B812-9DAD-11D1-80B4-00C04FD430C8
6ba7b813-9dad-11d1-80b4-00c04fd430c8
";

/// Temporary source tree plus input files for one run.
pub struct Fixture {
    pub temp: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.temp.path().join(rel)
    }

    pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).unwrap()
    }

    /// Config reading `listings` (relative to the temp dir) with sources under `src/`.
    pub fn config(&self, listings: &[&str]) -> MsiToolConfig {
        let mut config = MsiToolConfig::default();
        let build = &mut config.build;
        build.program_dir = Some("app|My App".to_string());
        build.source_root = self.path("src");
        build.output_dir = self.path("out");
        build.features_file = self.path("features.txt");
        build.uuids_file = self.path("uuids.txt");
        build.listings = listings.iter().map(|l| self.path(l)).collect();
        config
    }
}

/// Table rows without the three header lines
pub fn rows(table: &str) -> Vec<String> {
    table.lines().skip(3).map(str::to_string).collect()
}

pub fn exists(path: &Path) -> bool {
    path.exists()
}

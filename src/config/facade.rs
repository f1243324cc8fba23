//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::MsiToolConfig;
use crate::error::Result;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from `msi-tables.toml` in `dir` (if present) and environment.
    pub fn load(dir: &Path) -> Result<MsiToolConfig> {
        MergeService::load(dir)
    }

    /// Load configuration from a specific file, which must exist.
    pub fn load_from_file(path: &Path) -> Result<MsiToolConfig> {
        MergeService::load_from_file(path)
    }

    /// Create default configuration.
    pub fn default() -> MsiToolConfig {
        MsiToolConfig::default()
    }
}

//! MergeService: orchestrates sources, applies merge policy, deserializes to MsiToolConfig.

use crate::config::sources::{environment, workspace_file};
use crate::config::MsiToolConfig;
use crate::error::{MsiError, Result};
use std::path::Path;
use tracing::debug;

use super::merge_policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Precedence: defaults (lowest) -> `msi-tables.toml` in `dir` -> environment (highest).
    pub fn load(dir: &Path) -> Result<MsiToolConfig> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = workspace_file::add_to_builder(builder, dir)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load config from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<MsiToolConfig> {
        if !path.is_file() {
            return Err(MsiError::Resource(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        debug!(path = %path.display(), "Loading config file");

        let builder = merge_policy::builder_with_defaults()?;
        let builder = workspace_file::add_file(builder, path);
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}

//! Merge policy: the lowest-precedence layer every build starts from.

use crate::config::MsiToolConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder seeded with the serialized defaults, so every key exists before overlays.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = Config::try_from(&MsiToolConfig::default())?;
    Ok(Config::builder().add_source(defaults))
}

//! Configuration: defaults, `msi-tables.toml`, then `MSI_TABLES__SECTION__KEY` variables.

mod build;
pub mod facade;
pub mod merge;
pub mod sources;

pub use build::BuildConfig;
pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "msi-tables.toml";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "MSI_TABLES";

/// Complete tool configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MsiToolConfig {
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

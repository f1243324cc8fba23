//! Error types for table generation.

use thiserror::Error;

/// Errors raised while building installer tables.
///
/// Every variant is fatal: a run either produces the complete set of tables or none.
#[derive(Debug, Error)]
pub enum MsiError {
    /// Malformed hierarchical input (non-Unix line ending, malformed label, stray item)
    #[error("Format error: {0}")]
    Format(String),

    /// Missing or unreadable input, unreadable listed file, exhausted UUID source
    #[error("Resource error: {0}")]
    Resource(String),

    /// A feature item that names no root, directory, or file
    #[error("Resolution error: {0}")]
    Resolution(String),

    /// Missing or invalid command-line option
    #[error("Argument error: {0}")]
    Argument(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for MsiError {
    fn from(err: config::ConfigError) -> Self {
        MsiError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MsiError>;

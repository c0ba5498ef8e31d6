/*
[INPUT]:  Error sources (config file I/O, YAML parsing, value validation)
[OUTPUT]: Structured configuration error type
[POS]:    Error handling layer - library-level errors
[UPDATE]: When adding new error sources or improving error messages
*/

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading engine configuration.
///
/// Task operations themselves never fail; malformed input is ignored.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid YAML for the schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A value is out of range
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Result type alias for configuration loading
pub type Result<T> = std::result::Result<T, ConfigError>;

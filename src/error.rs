use std::io;

use thiserror::Error;

/// Errors raised by table operations that take a column index
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("column {index} out of range (table has {count} columns)")]
    ColumnOutOfRange { index: usize, count: usize },
}

/// Errors raised by a preference store
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference store I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse preferences: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

//! Error types for cluster config parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading a cluster config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot locate a home directory for the default config")]
    NoHomeDir,

    #[error("line {line}: {kind}")]
    Format { line: usize, kind: FormatError },
}

impl ConfigError {
    /// The underlying format error, if this is one.
    pub fn format_kind(&self) -> Option<&FormatError> {
        match self {
            ConfigError::Format { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

/// A value in the config file could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("node specifier `{0}` is missing `@`")]
    MissingAt(String),

    #[error("invalid integer for `{key}`: `{value}`")]
    InvalidInteger { key: &'static str, value: String },

    #[error("`unique` requires at least one character")]
    EmptyUnique,

    #[error("invalid craq node list: {0}")]
    InvalidList(String),
}

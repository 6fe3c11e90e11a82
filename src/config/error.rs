use std::path::PathBuf;
use thiserror::Error;

use crate::core::{DispatchError, ParseError};

/// Errors that can occur during configuration management.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config path is not valid UTF-8 and cannot be tilde-expanded.
    #[error("Invalid config path: {0}")]
    InvalidPath(PathBuf),

    /// Config file exists but is not valid TOML for this schema.
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Default config could not be rendered as TOML.
    #[error("Failed to serialise config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// `general.hotkey` does not describe a key sequence.
    #[error("Invalid hotkey in [general]: {0}")]
    InvalidHotkey(#[from] ParseError),

    /// The `[hotkeys]` tree has an invalid shape.
    #[error("Invalid hotkey tree: {0}")]
    InvalidTree(#[from] DispatchError),

    /// Atomic write operation failed.
    #[error("Atomic write failed: {0}")]
    WriteFailed(String),

    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

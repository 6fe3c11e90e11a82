//! Configuration file loading.
//!
//! The configuration is a TOML file with two sections:
//!
//! - **`[general]`**: the prompt hotkey, registered dynamically at startup
//! - **`[hotkeys]`**: the static hotkey tree, one nested table per key
//!
//! A missing file is created with the defaults, written atomically so a
//! crash never leaves a half-written config behind.
//!
//! # Example
//!
//! ```toml
//! [general]
//! hotkey = ["LAlt", "Backspace"]
//! prompt_action = "open-prompt"
//!
//! [hotkeys.LControl]
//! Escape = ["cancel", "notify"]
//! ```
//!
//! ```no_run
//! use hotkey_dispatch::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Path::new("~/.config/hotkey-dispatch/config.toml"))?;
//! println!("Prompt hotkey: {}", config.general_sequence()?);
//! # Ok::<(), hotkey_dispatch::config::ConfigError>(())
//! ```

use atomic_write_file::AtomicWriteFile;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::{Action, HotkeyTree, KeySequence, Keycode, ParseError};

mod error;

pub use error::ConfigError;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "~/.config/hotkey-dispatch/config.toml";

/// Top-level configuration
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Config {
    /// Dynamic prompt hotkey settings
    #[serde(default)]
    pub general: General,

    /// Static hotkey tree (key name → nested table, action name, or list)
    #[serde(default)]
    pub hotkeys: toml::Table,
}

/// `[general]` section
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct General {
    /// Key names of the prompt hotkey, in press order
    pub hotkey: Vec<String>,

    /// Action registered for `hotkey`
    pub prompt_action: String,
}

impl Default for General {
    fn default() -> Self {
        Self {
            hotkey: vec!["LAlt".to_string(), "Backspace".to_string()],
            prompt_action: "open-prompt".to_string(),
        }
    }
}

impl Config {
    /// Loads the configuration at `path`, creating it with defaults if missing.
    ///
    /// `~` is expanded to the home directory.
    ///
    /// # Errors
    ///
    /// * `ConfigError::InvalidPath` - Path is not valid UTF-8
    /// * `ConfigError::Parse` - File is not valid TOML for this schema
    /// * `ConfigError::WriteFailed` / `ConfigError::Io` - File could not be
    ///   read or the defaults could not be written
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let path = expand_path(path)?;

        if !path.exists() {
            let config = Config::default();
            config.save(&path)?;
            info!(path = %path.display(), "created default config");
            return Ok(config);
        }

        let content = fs::read_to_string(&path)?;
        let config = Config::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

        info!(
            path = %path.display(),
            tree_roots = config.hotkeys.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Writes this configuration to `path` atomically.
    ///
    /// Parent directories are created as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string(self)?;

        let mut file = AtomicWriteFile::options().open(path).map_err(|e| {
            ConfigError::WriteFailed(format!("Failed to open for atomic write: {}", e))
        })?;

        file.write_all(content.as_bytes())
            .map_err(|e| ConfigError::WriteFailed(format!("Failed to write content: {}", e)))?;

        file.commit().map_err(|e| {
            ConfigError::WriteFailed(format!("Failed to commit atomic write: {}", e))
        })?;

        Ok(())
    }

    /// Parses `general.hotkey` into a key sequence.
    pub fn general_sequence(&self) -> Result<KeySequence, ConfigError> {
        if self.general.hotkey.is_empty() {
            return Err(ConfigError::InvalidHotkey(ParseError::Empty));
        }

        let keys = self
            .general
            .hotkey
            .iter()
            .map(|name| name.parse::<Keycode>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(KeySequence::new(keys))
    }

    /// Builds the static tree from `[hotkeys]`.
    ///
    /// Returns `Ok(None)` when the section is empty.
    pub fn build_tree<R>(&self, resolver: R) -> Result<Option<HotkeyTree>, ConfigError>
    where
        R: Fn(&str) -> Option<Action>,
    {
        if self.hotkeys.is_empty() {
            return Ok(None);
        }

        Ok(Some(HotkeyTree::from_table(&self.hotkeys, resolver)?))
    }
}

/// Expands a leading `~` in `path`.
pub fn expand_path(path: &Path) -> Result<PathBuf, ConfigError> {
    let raw = path
        .to_str()
        .ok_or_else(|| ConfigError::InvalidPath(path.to_path_buf()))?;

    Ok(PathBuf::from(shellexpand::tilde(raw).as_ref()))
}

#[cfg(test)]
mod tests;

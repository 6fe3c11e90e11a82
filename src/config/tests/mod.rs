//! Config module tests
//!
//! Covers loading, default creation, and turning config sections into
//! dispatch structures.

use super::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::core::{DispatchError, Keycode};

/// Helper: Creates a temporary config file with the given content.
fn create_test_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, content).unwrap();
    (temp_dir, config_path)
}

/// Helper: Resolves every action name to a no-op action.
fn any_action(name: &str) -> Option<Action> {
    Some(Action::new(name, || Ok(())))
}

#[test]
fn test_load_creates_default_when_missing() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let config = Config::load(&config_path).unwrap();

    assert_eq!(config, Config::default());
    assert!(config_path.exists(), "Default config should be written");

    // The written file must round-trip to the same defaults
    let reloaded = Config::load(&config_path).unwrap();
    assert_eq!(reloaded, config);
}

#[test]
fn test_load_reads_existing_file() {
    let (_temp_dir, config_path) = create_test_config(
        r#"
[general]
hotkey = ["LControl", "Space"]
prompt_action = "ask"

[hotkeys.LControl]
Escape = ["cancel", "notify"]
"#,
    );

    let config = Config::load(&config_path).unwrap();

    assert_eq!(config.general.hotkey, vec!["LControl", "Space"]);
    assert_eq!(config.general.prompt_action, "ask");
    assert!(config.hotkeys.contains_key("LControl"));
}

#[test]
fn test_missing_sections_use_defaults() {
    let config = Config::from_toml("").unwrap();
    assert_eq!(config.general, General::default());
    assert!(config.hotkeys.is_empty());

    let config = Config::from_toml("[general]\nprompt_action = \"ask\"\n").unwrap();
    assert_eq!(config.general.hotkey, vec!["LAlt", "Backspace"]);
    assert_eq!(config.general.prompt_action, "ask");
}

#[test]
fn test_invalid_toml_reports_path() {
    let (_temp_dir, config_path) = create_test_config("[general\nhotkey = ");

    match Config::load(&config_path) {
        Err(ConfigError::Parse { path, .. }) => assert_eq!(path, config_path),
        other => panic!("Expected Parse error, got: {:?}", other),
    }
}

#[test]
fn test_general_sequence_default() {
    let seq = Config::default().general_sequence().unwrap();
    assert_eq!(seq.keys(), &[Keycode::LAlt, Keycode::Backspace]);
}

#[test]
fn test_general_sequence_rejects_unknown_key() {
    let mut config = Config::default();
    config.general.hotkey = vec!["LAlt".to_string(), "NotAKey".to_string()];

    assert!(matches!(
        config.general_sequence(),
        Err(ConfigError::InvalidHotkey(ParseError::UnknownKey(_)))
    ));
}

#[test]
fn test_general_sequence_rejects_empty() {
    let mut config = Config::default();
    config.general.hotkey.clear();

    assert!(matches!(
        config.general_sequence(),
        Err(ConfigError::InvalidHotkey(ParseError::Empty))
    ));
}

#[test]
fn test_build_tree_empty_section() {
    let tree = Config::default().build_tree(any_action).unwrap();
    assert!(tree.is_none());
}

#[test]
fn test_build_tree_from_section() {
    let config = Config::from_toml(
        r#"
[hotkeys.LControl]
Escape = ["cancel", "notify"]

[hotkeys.LAlt]
Backspace = "open-prompt"
"#,
    )
    .unwrap();

    let tree = config.build_tree(any_action).unwrap().unwrap();
    assert_eq!(tree.len(), 2);
}

#[test]
fn test_build_tree_reports_malformed_node() {
    let config = Config::from_toml("[hotkeys.LControl]\nEscape = 42\n").unwrap();

    match config.build_tree(any_action) {
        Err(ConfigError::InvalidTree(DispatchError::MalformedTreeNode { path, .. })) => {
            assert_eq!(path, "LControl+Escape");
        }
        other => panic!("Expected InvalidTree error, got: {:?}", other),
    }
}

#[test]
fn test_expand_path_tilde() {
    let expanded = expand_path(Path::new("~/config.toml")).unwrap();
    assert!(expanded.ends_with("config.toml"));

    let plain = expand_path(Path::new("/tmp/config.toml")).unwrap();
    assert_eq!(plain, PathBuf::from("/tmp/config.toml"));
}

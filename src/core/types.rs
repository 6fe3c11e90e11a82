// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! src/core/types.rs
//!
//! Core type definitions for hotkey dispatch
//!
//! This module defines the fundamental types used throughout the engine:
//! - `Keycode`: A single physical key, named the way OS key listeners report it
//! - `KeySequence`: Ordered keys considered active together for one dispatch
//! - `CanonicalKey`: Collision-free lookup key derived from a `KeySequence`
//!
//! Keycodes are opaque to the dispatcher. Their names exist only so that
//! configuration files and logs can refer to them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::parser::ParseError;

/// A single physical key
///
/// Variant names follow the convention of the OS-level key listener
/// (`LAlt`, `Backspace`, `Key0`...). No canonical name contains `+`,
/// which keeps joined sequences unambiguous.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum Keycode {
    Key0, Key1, Key2, Key3, Key4, Key5, Key6, Key7, Key8, Key9,
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    Escape,
    Space,
    LControl,
    RControl,
    LShift,
    RShift,
    LAlt,
    RAlt,
    LMeta,
    RMeta,
    Enter,
    Up,
    Down,
    Left,
    Right,
    Backspace,
    CapsLock,
    Tab,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
    Grave,
    Minus,
    Equal,
    LeftBracket,
    RightBracket,
    BackSlash,
    Semicolon,
    Apostrophe,
    Comma,
    Dot,
    Slash,
}

/// Canonical name table, in declaration order
const KEY_NAMES: &[(Keycode, &str)] = &[
    (Keycode::Key0, "Key0"),
    (Keycode::Key1, "Key1"),
    (Keycode::Key2, "Key2"),
    (Keycode::Key3, "Key3"),
    (Keycode::Key4, "Key4"),
    (Keycode::Key5, "Key5"),
    (Keycode::Key6, "Key6"),
    (Keycode::Key7, "Key7"),
    (Keycode::Key8, "Key8"),
    (Keycode::Key9, "Key9"),
    (Keycode::A, "A"),
    (Keycode::B, "B"),
    (Keycode::C, "C"),
    (Keycode::D, "D"),
    (Keycode::E, "E"),
    (Keycode::F, "F"),
    (Keycode::G, "G"),
    (Keycode::H, "H"),
    (Keycode::I, "I"),
    (Keycode::J, "J"),
    (Keycode::K, "K"),
    (Keycode::L, "L"),
    (Keycode::M, "M"),
    (Keycode::N, "N"),
    (Keycode::O, "O"),
    (Keycode::P, "P"),
    (Keycode::Q, "Q"),
    (Keycode::R, "R"),
    (Keycode::S, "S"),
    (Keycode::T, "T"),
    (Keycode::U, "U"),
    (Keycode::V, "V"),
    (Keycode::W, "W"),
    (Keycode::X, "X"),
    (Keycode::Y, "Y"),
    (Keycode::Z, "Z"),
    (Keycode::F1, "F1"),
    (Keycode::F2, "F2"),
    (Keycode::F3, "F3"),
    (Keycode::F4, "F4"),
    (Keycode::F5, "F5"),
    (Keycode::F6, "F6"),
    (Keycode::F7, "F7"),
    (Keycode::F8, "F8"),
    (Keycode::F9, "F9"),
    (Keycode::F10, "F10"),
    (Keycode::F11, "F11"),
    (Keycode::F12, "F12"),
    (Keycode::Escape, "Escape"),
    (Keycode::Space, "Space"),
    (Keycode::LControl, "LControl"),
    (Keycode::RControl, "RControl"),
    (Keycode::LShift, "LShift"),
    (Keycode::RShift, "RShift"),
    (Keycode::LAlt, "LAlt"),
    (Keycode::RAlt, "RAlt"),
    (Keycode::LMeta, "LMeta"),
    (Keycode::RMeta, "RMeta"),
    (Keycode::Enter, "Enter"),
    (Keycode::Up, "Up"),
    (Keycode::Down, "Down"),
    (Keycode::Left, "Left"),
    (Keycode::Right, "Right"),
    (Keycode::Backspace, "Backspace"),
    (Keycode::CapsLock, "CapsLock"),
    (Keycode::Tab, "Tab"),
    (Keycode::Home, "Home"),
    (Keycode::End, "End"),
    (Keycode::PageUp, "PageUp"),
    (Keycode::PageDown, "PageDown"),
    (Keycode::Insert, "Insert"),
    (Keycode::Delete, "Delete"),
    (Keycode::Grave, "Grave"),
    (Keycode::Minus, "Minus"),
    (Keycode::Equal, "Equal"),
    (Keycode::LeftBracket, "LeftBracket"),
    (Keycode::RightBracket, "RightBracket"),
    (Keycode::BackSlash, "BackSlash"),
    (Keycode::Semicolon, "Semicolon"),
    (Keycode::Apostrophe, "Apostrophe"),
    (Keycode::Comma, "Comma"),
    (Keycode::Dot, "Dot"),
    (Keycode::Slash, "Slash"),
];

impl Keycode {
    /// Returns the canonical name of this key (e.g. `"LAlt"`)
    pub fn name(self) -> &'static str {
        KEY_NAMES
            .iter()
            .find(|(key, _)| *key == self)
            .map(|(_, name)| *name)
            .unwrap_or("Unknown")
    }

    /// Iterates over every known keycode in declaration order
    pub fn all() -> impl Iterator<Item = Keycode> {
        KEY_NAMES.iter().map(|(key, _)| *key)
    }
}

impl fmt::Display for Keycode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Keycode {
    type Err = ParseError;

    /// Parses a key name, case-insensitively
    ///
    /// Besides canonical names, the usual aliases are accepted:
    /// - `CTRL`/`LCTRL`/`CONTROL` → `LControl`, `RCTRL` → `RControl`
    /// - `ALT` → `LAlt`, `SHIFT` → `LShift`
    /// - `SUPER`/`WIN`/`CMD`/`META` → `LMeta`
    /// - `ESC` → `Escape`, `RETURN` → `Enter`, `DEL` → `Delete`
    /// - A bare digit (`5`) → `Key5`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let upper = trimmed.to_uppercase();

        let alias = match upper.as_str() {
            "CTRL" | "LCTRL" | "CONTROL" => Some(Keycode::LControl),
            "RCTRL" => Some(Keycode::RControl),
            "ALT" => Some(Keycode::LAlt),
            "SHIFT" => Some(Keycode::LShift),
            "SUPER" | "WIN" | "CMD" | "META" | "LSUPER" => Some(Keycode::LMeta),
            "RSUPER" => Some(Keycode::RMeta),
            "ESC" => Some(Keycode::Escape),
            "RETURN" => Some(Keycode::Enter),
            "DEL" => Some(Keycode::Delete),
            "BACKSLASH" => Some(Keycode::BackSlash),
            "PERIOD" => Some(Keycode::Dot),
            _ => None,
        };
        if let Some(key) = alias {
            return Ok(key);
        }

        // Bare digits map onto the KeyN variants
        let lookup = if upper.len() == 1 && upper.chars().all(|c| c.is_ascii_digit()) {
            format!("KEY{}", upper)
        } else {
            upper
        };

        KEY_NAMES
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(&lookup))
            .map(|(key, _)| *key)
            .ok_or_else(|| ParseError::UnknownKey(trimmed.to_string()))
    }
}

impl TryFrom<String> for Keycode {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Keycode> for String {
    fn from(key: Keycode) -> Self {
        key.name().to_string()
    }
}

/// Ordered keys considered active together for one dispatch event
///
/// Order matters: `[LAlt, A]` and `[A, LAlt]` are different dispatch
/// targets. An empty sequence can be built but is rejected at every
/// dispatch boundary with `DispatchError::EmptySequence`.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct KeySequence(Vec<Keycode>);

impl KeySequence {
    pub fn new(keys: Vec<Keycode>) -> Self {
        Self(keys)
    }

    pub fn keys(&self) -> &[Keycode] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Keycode> {
        self.0.iter()
    }
}

impl From<Vec<Keycode>> for KeySequence {
    fn from(keys: Vec<Keycode>) -> Self {
        Self(keys)
    }
}

impl<const N: usize> From<[Keycode; N]> for KeySequence {
    fn from(keys: [Keycode; N]) -> Self {
        Self(keys.to_vec())
    }
}

impl FromIterator<Keycode> for KeySequence {
    fn from_iter<T: IntoIterator<Item = Keycode>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a KeySequence {
    type Item = &'a Keycode;
    type IntoIter = std::slice::Iter<'a, Keycode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<empty>");
        }

        let keys = self
            .0
            .iter()
            .map(|k| k.name())
            .collect::<Vec<_>>()
            .join(" + ");
        write!(f, "{}", keys)
    }
}

/// Deterministic lookup key derived from a `KeySequence`
///
/// Only `canonical::canonicalize` creates these, so two equal
/// `CanonicalKey`s always come from equal sequences.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    pub(crate) fn new(encoded: String) -> Self {
        Self(encoded)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keycode_display() {
        assert_eq!(format!("{}", Keycode::LAlt), "LAlt");
        assert_eq!(format!("{}", Keycode::Key7), "Key7");
    }

    #[test]
    fn test_every_keycode_has_a_name() {
        for key in Keycode::all() {
            assert_ne!(key.name(), "Unknown", "{:?} missing from name table", key);
        }
    }

    #[test]
    fn test_names_never_contain_separator() {
        assert!(Keycode::all().all(|k| !k.name().contains('+')));
    }

    #[test]
    fn test_sequence_display() {
        let seq = KeySequence::from([Keycode::LControl, Keycode::Escape]);
        assert_eq!(format!("{}", seq), "LControl + Escape");
        assert_eq!(format!("{}", KeySequence::default()), "<empty>");
    }
}

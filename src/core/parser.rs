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

//! src/core/parser.rs
//!
//! Key sequence text syntax
//!
//! Hotkeys are written on the command line and in logs as key names joined
//! by `+`, with optional whitespace around the separator:
//! - `LAlt+Backspace`
//! - `LControl + Escape`
//! - `ctrl + shift + k` (aliases, any case)
//!
//! # Architecture
//! The parser uses nom combinators for tokenising and leaves key name
//! resolution to `Keycode::from_str`, so aliases live in one place.

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, space0},
    multi::separated_list1,
    IResult, Parser,
};
use thiserror::Error;

use crate::core::types::{KeySequence, Keycode};

/// Parse errors for key names and key sequences
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Key sequence is empty")]
    Empty,

    #[error("Invalid key sequence '{input}': {message}")]
    InvalidSyntax { input: String, message: String },

    #[error("Unknown key name '{0}'")]
    UnknownKey(String),
}

/// Parse a complete key sequence
///
/// # Example
/// ```ignore
/// let seq = parse_key_sequence("LControl + Escape")?;
/// assert_eq!(seq.len(), 2);
/// ```
pub fn parse_key_sequence(input: &str) -> Result<KeySequence, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let (rest, tokens) = parse_key_tokens(trimmed).map_err(|e| ParseError::InvalidSyntax {
        input: input.to_string(),
        message: format!("{:?}", e),
    })?;

    if !rest.is_empty() {
        return Err(ParseError::InvalidSyntax {
            input: input.to_string(),
            message: format!("unexpected trailing input '{}'", rest),
        });
    }

    tokens
        .into_iter()
        .map(str::parse::<Keycode>)
        .collect::<Result<Vec<_>, _>>()
        .map(KeySequence::new)
}

/// Split a sequence into raw key tokens
///
/// `"LAlt + Backspace"` → `["LAlt", "Backspace"]`
pub fn parse_key_tokens(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1((space0, char('+'), space0), parse_key_token).parse(input)
}

/// Parse one key token (letters, digits and underscores)
pub fn parse_key_token(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_')(input)
}

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

//! src/core/mod.rs
//!
//! Core dispatch logic module
//!
//! This module contains the data structures and algorithms that turn a
//! key sequence into handler invocations, including:
//! - Type definitions for keycodes, key sequences and canonical keys
//! - Canonicalisation of key sequences into lookup keys
//! - The static hotkey tree and the dynamic handler registry
//! - The engine that unifies both behind one entry point
//! - Detection of registry bindings shadowed by the tree
//!
//! Nothing here talks to the operating system; the key listener is an
//! injected trait object, so everything can be unit tested with fakes.

pub mod action;
pub mod canonical;
pub mod conflict;
pub mod engine;
pub mod error;
pub mod parser;
pub mod registry;
pub mod tree;
pub mod types;

pub use action::{Action, HandlerList};
pub use canonical::canonicalize;
pub use conflict::{find_shadowed, Shadowed};
pub use engine::{DispatchOutcome, DispatchSource, Dispatcher, HotkeyEngine};
pub use error::DispatchError;
pub use parser::{parse_key_sequence, ParseError};
pub use registry::HandlerRegistry;
pub use tree::{HotkeyTree, Leaf, TreeNode};
pub use types::*;

#[cfg(test)]
mod tests;

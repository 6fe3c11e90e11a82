// Copyright 2025 bakri (tidynest@proton.me)
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

//! Hotkey Dispatch
//!
//! A configurable hotkey dispatch engine that turns key sequences reported
//! by an OS-level key listener into calls to application callbacks.
//!
//! # Features
//!
//! - **Static Tree:** Nested key mappings loaded from a TOML config
//! - **Dynamic Registry:** Handlers registered at runtime with `on_keys`
//! - **Fan-out:** Any number of handlers per key combination, run in order
//! - **Fail-fast:** A failing handler stops the rest and reports the error
//! - **Reentrant Registration:** Handlers may register new hotkeys mid-dispatch
//! - **Shadow Detection:** Finds runtime bindings hidden by static ones
//!
//! # Architecture
//!
//! - **`core`:** Dispatch logic (types, canonicalisation, tree, registry, engine)
//! - **`config`:** TOML configuration loading with defaults
//! - **`listener`:** Seam to the OS-level key listener
//! - **`logging`:** `tracing` subscriber setup for the CLI
//!
//! # Examples
//!
//! ## Building a static tree
//!
//! ```
//! use hotkey_dispatch::core::{Action, HotkeyTree, KeySequence, Keycode, TreeNode};
//!
//! let tree = HotkeyTree::new(TreeNode::branch([(
//!     Keycode::LControl,
//!     TreeNode::branch([(Keycode::Escape, TreeNode::action(Action::new("cancel", || Ok(()))))]),
//! )]))?;
//!
//! let invoked = tree.dispatch(&KeySequence::from([Keycode::LControl, Keycode::Escape]))?;
//! assert_eq!(invoked, 1);
//! # Ok::<(), hotkey_dispatch::core::DispatchError>(())
//! ```
//!
//! ## Loading from a config file
//!
//! ```no_run
//! use hotkey_dispatch::config::Config;
//! use hotkey_dispatch::core::Action;
//! use std::path::Path;
//!
//! let config = Config::load(Path::new("~/.config/hotkey-dispatch/config.toml"))?;
//! let tree = config.build_tree(|name| Some(Action::new(name, || Ok(()))))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod core;
pub mod listener;
pub mod logging;

// Re-export commonly used types for convenience
pub use crate::core::{Action, DispatchError, HandlerRegistry, HotkeyEngine, HotkeyTree, KeySequence, Keycode};

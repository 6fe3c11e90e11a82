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


//! Key listener integration
//!
//! The engine never talks to the operating system. Whenever a sequence is
//! registered for the first time, the registry asks a `KeyListener` to
//! start watching it; the listener later reports matching key-down events
//! back through `HotkeyEngine::on_key_sequence`.
//!
//! # Implementations
//!
//! - **RecordingListener**: keeps every watch request in memory (tests and
//!   dry runs)
//! - **LogListener**: logs watch requests through `tracing` (CLI default)
//!
//! # Example
//! ```
//! use hotkey_dispatch::listener::{KeyListener, RecordingListener};
//! use hotkey_dispatch::core::{KeySequence, Keycode};
//!
//! let listener = RecordingListener::new();
//! listener.watch(&KeySequence::from([Keycode::LAlt, Keycode::Backspace]));
//!
//! assert_eq!(listener.watched().len(), 1);
//! ```

use std::cell::RefCell;

use tracing::info;

use crate::core::KeySequence;

/// Outbound interface to the OS-level key listener
pub trait KeyListener {
    /// Requests that the listener report presses of `sequence`.
    ///
    /// Called once per distinct sequence, the first time it is registered.
    fn watch(&self, sequence: &KeySequence);
}

/// Listener that records watch requests in memory
///
/// Nothing is observed on the real keyboard. Useful for tests and for
/// dry runs of a configuration.
#[derive(Debug, Default)]
pub struct RecordingListener {
    watched: RefCell<Vec<KeySequence>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every sequence passed to `watch`, in call order
    pub fn watched(&self) -> Vec<KeySequence> {
        self.watched.borrow().clone()
    }

    /// Number of times `watch` was called for `sequence`
    pub fn watch_count(&self, sequence: &KeySequence) -> usize {
        self.watched.borrow().iter().filter(|s| *s == sequence).count()
    }
}

impl KeyListener for RecordingListener {
    fn watch(&self, sequence: &KeySequence) {
        self.watched.borrow_mut().push(sequence.clone());
    }
}

/// Listener that only logs watch requests
#[derive(Clone, Copy, Debug, Default)]
pub struct LogListener;

impl KeyListener for LogListener {
    fn watch(&self, sequence: &KeySequence) {
        info!(%sequence, "listening for hotkey");
    }
}

#[cfg(test)]
mod tests;

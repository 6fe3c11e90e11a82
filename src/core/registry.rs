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

//! Dynamic handler registry
//!
//! Maps canonical keys to append-only handler lists, using an insertion
//! ordered map so that listings and held-key matching follow registration
//! order.
//!
//! # Performance
//! - Register: O(1) average case
//! - Dispatch: O(1) lookup + O(h) for h handlers
//! - Held-key matching: O(n) where n = number of registered sequences
//!
//! # Reentrancy
//! Handlers may call `register` while the registry is dispatching. Dispatch
//! snapshots the handler list and releases its borrow before invoking, so
//! such registrations never conflict with the in-flight call. They become
//! visible to the next dispatch.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::debug;

use crate::core::action::{invoke, Action, HandlerList};
use crate::core::canonical::canonicalize;
use crate::core::engine::{DispatchSource, Dispatcher};
use crate::core::error::DispatchError;
use crate::core::types::{CanonicalKey, KeySequence, Keycode};
use crate::listener::KeyListener;

/// One registered key sequence and its handlers
#[derive(Clone, Debug)]
struct Entry {
    sequence: KeySequence,
    /// Never empty: entries are created together with their first handler
    handlers: HandlerList,
}

/// Runtime registry of key sequences and their handlers.
///
/// Grows monotonically; there is no unregister operation.
pub struct HandlerRegistry {
    /// Collaborator asked to watch each newly registered sequence
    listener: Rc<dyn KeyListener>,
    /// Maps CanonicalKey to its sequence and handlers, in registration order
    entries: RefCell<IndexMap<CanonicalKey, Entry>>,
}

impl HandlerRegistry {
    /// Creates an empty registry that reports new sequences to `listener`.
    pub fn new(listener: Rc<dyn KeyListener>) -> Self {
        Self {
            listener,
            entries: RefCell::new(IndexMap::new()),
        }
    }

    /// Appends `action` to the handlers of `sequence`.
    ///
    /// The first registration of a sequence asks the listener to watch it;
    /// later registrations only append.
    ///
    /// # Returns
    ///
    /// * `Ok(CanonicalKey)` - Key the handler was stored under
    /// * `Err(DispatchError::EmptySequence)` - `sequence` has no keys
    pub fn register(
        &self,
        sequence: &KeySequence,
        action: Action,
    ) -> Result<CanonicalKey, DispatchError> {
        let key = canonicalize(sequence)?;

        let is_new = {
            let mut entries = self.entries.borrow_mut();
            match entries.get_mut(&key) {
                Some(entry) => {
                    entry.handlers.push(action);
                    false
                }
                None => {
                    entries.insert(
                        key.clone(),
                        Entry {
                            sequence: sequence.clone(),
                            handlers: vec![action],
                        },
                    );
                    true
                }
            }
        };

        // Borrow released: the listener may call back into the registry
        if is_new {
            debug!(%key, "watching new hotkey");
            self.listener.watch(sequence);
        } else {
            debug!(%key, "appended handler to existing hotkey");
        }

        Ok(key)
    }

    /// Returns a snapshot of the handlers for `sequence`.
    ///
    /// Unregistered sequences yield an empty list.
    pub fn handlers(&self, sequence: &KeySequence) -> Result<HandlerList, DispatchError> {
        let key = canonicalize(sequence)?;
        Ok(self
            .entries
            .borrow()
            .get(&key)
            .map(|entry| entry.handlers.clone())
            .unwrap_or_default())
    }

    /// Runs every handler registered for `sequence`, in registration order.
    ///
    /// An unregistered sequence is not an error: nothing runs and `Ok(0)` is
    /// returned.
    pub fn dispatch(&self, sequence: &KeySequence) -> Result<usize, DispatchError> {
        let key = canonicalize(sequence)?;
        let handlers = self.handlers(sequence)?;
        invoke(&key, &handlers)
    }

    /// Finds the best registered sequence whose keys are all held.
    ///
    /// Longer sequences win; among equally long ones the earliest
    /// registration wins.
    pub fn resolve_held(&self, held: &HashSet<Keycode>) -> Option<(KeySequence, HandlerList)> {
        let entries = self.entries.borrow();
        let mut best: Option<&Entry> = None;

        for entry in entries.values() {
            if !entry.sequence.iter().all(|key| held.contains(key)) {
                continue;
            }
            let longer = best.is_none_or(|current| entry.sequence.len() > current.sequence.len());
            if longer {
                best = Some(entry);
            }
        }

        best.map(|entry| (entry.sequence.clone(), entry.handlers.clone()))
    }

    /// Number of handlers registered for `sequence`
    pub fn handler_count(&self, sequence: &KeySequence) -> usize {
        canonicalize(sequence)
            .ok()
            .and_then(|key| self.entries.borrow().get(&key).map(|e| e.handlers.len()))
            .unwrap_or(0)
    }

    /// Registered sequences, in registration order
    pub fn sequences(&self) -> Vec<KeySequence> {
        self.entries
            .borrow()
            .values()
            .map(|entry| entry.sequence.clone())
            .collect()
    }

    /// Number of distinct registered sequences
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Dispatcher for HandlerRegistry {
    fn source(&self) -> DispatchSource {
        DispatchSource::Registry
    }

    fn resolve(&self, sequence: &KeySequence) -> Result<Option<HandlerList>, DispatchError> {
        let handlers = self.handlers(sequence)?;
        Ok(if handlers.is_empty() { None } else { Some(handlers) })
    }
}

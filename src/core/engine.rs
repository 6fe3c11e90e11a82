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

//! Unified dispatch entry point
//!
//! # Precedence
//!
//! The engine consults its dispatchers in a fixed order:
//! 1. **Static tree** - bindings from the configuration file
//! 2. **Dynamic registry** - bindings added at runtime with `on_keys`
//!
//! The first dispatcher that resolves a sequence owns it; later ones are
//! not consulted. A registry binding for a sequence the tree also binds is
//! therefore shadowed, and `on_keys` warns when that happens.
//!
//! # Threading
//!
//! Single-threaded and synchronous. A dispatch runs every handler to
//! completion before returning. Handlers may register new hotkeys through
//! the engine while it is dispatching.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::core::action::{invoke, Action, HandlerList};
use crate::core::canonical::canonicalize;
use crate::core::error::DispatchError;
use crate::core::registry::HandlerRegistry;
use crate::core::tree::HotkeyTree;
use crate::core::types::{CanonicalKey, KeySequence, Keycode};

/// Which dispatcher handled a sequence
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DispatchSource {
    /// Static configuration tree
    Tree,
    /// Runtime handler registry
    Registry,
}

impl fmt::Display for DispatchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchSource::Tree => write!(f, "tree"),
            DispatchSource::Registry => write!(f, "registry"),
        }
    }
}

/// Result of a successful dispatch call
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DispatchOutcome {
    /// A dispatcher owned the sequence and all its handlers ran
    Handled { source: DispatchSource, invoked: usize },
    /// No dispatcher knows the sequence; nothing ran
    Unmatched,
}

/// Resolves key sequences to handler lists.
///
/// `Ok(None)` means "not mine", letting the engine try the next
/// dispatcher. Errors are reserved for invalid input.
pub trait Dispatcher {
    /// Identifies this dispatcher in outcomes and logs
    fn source(&self) -> DispatchSource;

    /// Finds the handlers for `sequence`, if this dispatcher has any.
    fn resolve(&self, sequence: &KeySequence) -> Result<Option<HandlerList>, DispatchError>;
}

/// Hotkey engine combining the static tree and the dynamic registry
///
/// # Example
/// ```
/// use std::rc::Rc;
/// use hotkey_dispatch::core::{Action, DispatchOutcome, HandlerRegistry, HotkeyEngine, KeySequence, Keycode};
/// use hotkey_dispatch::listener::RecordingListener;
///
/// let registry = Rc::new(HandlerRegistry::new(Rc::new(RecordingListener::new())));
/// let engine = HotkeyEngine::new(None, registry);
///
/// let seq = KeySequence::from([Keycode::LControl, Keycode::Escape]);
/// engine.on_keys(&seq, Action::new("cancel", || Ok(())))?;
///
/// assert!(matches!(engine.on_key_sequence(&seq)?, DispatchOutcome::Handled { invoked: 1, .. }));
/// # Ok::<(), hotkey_dispatch::core::DispatchError>(())
/// ```
pub struct HotkeyEngine {
    /// Static tree, if the configuration defines one
    tree: Option<Rc<HotkeyTree>>,
    /// Runtime registry, shared with anything that registers hotkeys
    registry: Rc<HandlerRegistry>,
    /// Dispatchers in precedence order
    dispatchers: Vec<Rc<dyn Dispatcher>>,
}

impl HotkeyEngine {
    /// Creates an engine consulting `tree` first, then `registry`.
    pub fn new(tree: Option<HotkeyTree>, registry: Rc<HandlerRegistry>) -> Self {
        let tree = tree.map(Rc::new);

        let mut dispatchers: Vec<Rc<dyn Dispatcher>> = Vec::with_capacity(2);
        if let Some(tree) = &tree {
            dispatchers.push(tree.clone());
        }
        dispatchers.push(registry.clone());

        Self {
            tree,
            registry,
            dispatchers,
        }
    }

    /// The static tree, if any
    pub fn tree(&self) -> Option<&HotkeyTree> {
        self.tree.as_deref()
    }

    /// The runtime registry
    pub fn registry(&self) -> &Rc<HandlerRegistry> {
        &self.registry
    }

    /// Registers `action` for `sequence` in the dynamic registry.
    ///
    /// Asks the key listener to watch the sequence on first registration.
    /// Logs a warning when the static tree already binds the sequence,
    /// since the tree takes precedence and the new handler would never run.
    pub fn on_keys(
        &self,
        sequence: &KeySequence,
        action: Action,
    ) -> Result<CanonicalKey, DispatchError> {
        if let Some(tree) = &self.tree {
            if tree.lookup(sequence).is_ok() {
                warn!(%sequence, action = action.label(), "registration shadowed by static binding");
            }
        }

        self.registry.register(sequence, action)
    }

    /// Dispatches one key sequence delivered by the key listener.
    ///
    /// # Returns
    ///
    /// * `Ok(DispatchOutcome::Handled)` - All handlers of the owning dispatcher ran
    /// * `Ok(DispatchOutcome::Unmatched)` - Nothing is bound; nothing ran
    /// * `Err(DispatchError::EmptySequence)` - `sequence` has no keys
    /// * `Err(DispatchError::ActionFailed)` - A handler failed; the rest were skipped
    pub fn on_key_sequence(&self, sequence: &KeySequence) -> Result<DispatchOutcome, DispatchError> {
        let target = canonicalize(sequence)?;

        for dispatcher in &self.dispatchers {
            if let Some(handlers) = dispatcher.resolve(sequence)? {
                let source = dispatcher.source();
                debug!(%target, %source, handlers = handlers.len(), "dispatching");

                let invoked = invoke(&target, &handlers)?;
                return Ok(DispatchOutcome::Handled { source, invoked });
            }
        }

        debug!(%target, "unmatched key sequence");
        Ok(DispatchOutcome::Unmatched)
    }

    /// Dispatches on the set of currently held keys.
    ///
    /// Picks the longest registered sequence whose keys are all held. Only
    /// the registry takes part, since tree paths are ordered.
    pub fn on_held_keys(&self, held: &HashSet<Keycode>) -> Result<DispatchOutcome, DispatchError> {
        if held.is_empty() {
            return Err(DispatchError::EmptySequence);
        }

        match self.registry.resolve_held(held) {
            Some((sequence, handlers)) => {
                let target = canonicalize(&sequence)?;
                debug!(%target, held = held.len(), "dispatching held keys");

                let invoked = invoke(&target, &handlers)?;
                Ok(DispatchOutcome::Handled {
                    source: DispatchSource::Registry,
                    invoked,
                })
            }
            None => Ok(DispatchOutcome::Unmatched),
        }
    }
}

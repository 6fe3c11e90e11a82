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

//! Actions and handler invocation
//!
//! An `Action` is a labelled zero-argument callback executed for its side
//! effects. The label shows up in logs and listings only; dispatch never
//! looks at it.

use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::core::error::DispatchError;
use crate::core::types::CanonicalKey;

/// Ordered handlers bound to one key combination (duplicates allowed)
pub type HandlerList = Vec<Action>;

/// A labelled, shareable callback
///
/// Cloning an `Action` shares the underlying callback, so registering the
/// same clone twice makes it fire twice.
#[derive(Clone)]
pub struct Action {
    label: Rc<str>,
    callback: Rc<dyn Fn() -> anyhow::Result<()>>,
}

impl Action {
    /// Creates an action from a label and a callback.
    pub fn new<F>(label: impl Into<String>, callback: F) -> Self
    where
        F: Fn() -> anyhow::Result<()> + 'static,
    {
        let label: String = label.into();
        Self {
            label: Rc::from(label),
            callback: Rc::new(callback),
        }
    }

    /// Human-readable name of this action
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Runs the callback once.
    pub fn call(&self) -> anyhow::Result<()> {
        (self.callback)()
    }

    /// Returns true if both actions share the same callback.
    pub fn ptr_eq(&self, other: &Action) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").field("label", &self.label).finish()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Invokes handlers in order, stopping at the first failure.
///
/// # Returns
///
/// * `Ok(usize)` - Number of handlers run (all of them)
/// * `Err(DispatchError::ActionFailed)` - A handler failed; later handlers
///   were skipped
pub fn invoke(target: &CanonicalKey, handlers: &[Action]) -> Result<usize, DispatchError> {
    for (index, action) in handlers.iter().enumerate() {
        debug!(%target, action = action.label(), index, "invoking handler");

        if let Err(e) = action.call() {
            warn!(
                %target,
                action = action.label(),
                skipped = handlers.len() - index - 1,
                "handler failed: {:#}",
                e
            );
            return Err(DispatchError::ActionFailed {
                target: target.clone(),
                index,
                action: action.label().to_string(),
                source: e.into(),
            });
        }
    }

    Ok(handlers.len())
}
